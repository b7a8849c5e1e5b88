//! Step pacing for automatic playback.
//!
//! The optimiser has no timer of its own. A front end asks one of these
//! helpers whether the next automatic `step()` is due, given the run's
//! `step_interval_seconds`.
//!
//! - [`frame_due`]: frame-counter pacing for render loops
//! - [`StepTimer`]: wall-clock pacing over a [`Clock`]

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Whether an automatic step should fire on `frame`.
///
/// Fires on frame 0 and then every `floor(frames_per_second * seconds_per_iteration)`
/// frames. A period shorter than one frame fires every frame.
pub fn frame_due(frame: u64, frames_per_second: f64, seconds_per_iteration: f64) -> bool {
    if frame == 0 {
        return true;
    }
    let period = (frames_per_second * seconds_per_iteration).floor();
    if !period.is_finite() || period < 1.0 {
        return true;
    }
    frame % (period as u64) == 0
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis().min(u64::MAX as u128) as u64
    }
}

/// Manually advanced clock for tests
#[derive(Debug, Default)]
pub struct MockClock {
    current_time_ms: AtomicU64,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the mock clock
    pub fn advance(&self, duration: Duration) {
        self.current_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> u64 {
        self.current_time_ms.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Wall-clock pacing for automatic steps
#[derive(Debug)]
pub struct StepTimer<C> {
    clock: C,
    last_fire_ms: Option<u64>,
}

impl<C: Clock> StepTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_fire_ms: None,
        }
    }

    /// Returns `true` (and restarts the interval) when at least
    /// `seconds_per_iteration` has passed since the last fire. The first
    /// poll always fires.
    pub fn poll(&mut self, seconds_per_iteration: f64) -> bool {
        let now = self.clock.now_millis();
        let interval_ms = (seconds_per_iteration.max(0.0) * 1000.0) as u64;

        let due = match self.last_fire_ms {
            None => true,
            Some(last) => now.saturating_sub(last) >= interval_ms,
        };
        if due {
            self.last_fire_ms = Some(now);
        }
        due
    }

    /// Time left before the next fire, zero when already due
    pub fn remaining(&self, seconds_per_iteration: f64) -> Duration {
        let interval_ms = (seconds_per_iteration.max(0.0) * 1000.0) as u64;
        match self.last_fire_ms {
            None => Duration::ZERO,
            Some(last) => {
                let elapsed = self.clock.now_millis().saturating_sub(last);
                Duration::from_millis(interval_ms.saturating_sub(elapsed))
            }
        }
    }

    /// Forget the last fire so the next poll fires immediately
    pub fn restart(&mut self) {
        self.last_fire_ms = None;
    }
}
