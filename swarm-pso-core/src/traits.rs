//! Core traits for SwarmPSO
//!
//! [`FitnessFunction`] is the capability the caller supplies; [`Optimiser`]
//! is the capability set every search algorithm exposes to a front end.

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::LoadReport;
use crate::config::RunConfig;
use crate::history::History;
use crate::swarm::{Point, Swarm};
use crate::Result;

/// Scalar cost of a point; lower is better
pub trait FitnessFunction {
    /// Evaluate the cost of `point` under the current run configuration
    fn evaluate(&self, point: Point, config: &RunConfig) -> f64;
}

impl<F> FitnessFunction for F
where
    F: Fn(Point, &RunConfig) -> f64,
{
    fn evaluate(&self, point: Point, config: &RunConfig) -> f64 {
        self(point, config)
    }
}

/// Euclidean distance from a point to the configured goal
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceToGoal;

#[cfg(feature = "std")]
impl FitnessFunction for DistanceToGoal {
    fn evaluate(&self, point: Point, config: &RunConfig) -> f64 {
        (point.x - config.goal.x).hypot(point.y - config.goal.y)
    }
}

/// Result of asking an optimiser for one more step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new snapshot was recorded at `iteration`
    Advanced { iteration: usize },
    /// The iteration cap was already reached; nothing changed
    Capped { iteration: usize },
}

impl StepOutcome {
    pub fn advanced(&self) -> bool {
        matches!(self, StepOutcome::Advanced { .. })
    }
}

/// Human-readable run status for a front end title bar or log line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub global_best_fitness: f64,
    pub iteration: usize,
    pub history_depth: usize,
    pub max_iterations: usize,
}

impl fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Global Best Fitness: {:.6} Iteration: {}/{} ({})",
            self.global_best_fitness, self.iteration, self.history_depth, self.max_iterations
        )
    }
}

/// The operations a search algorithm offers to its front end.
///
/// Every implementation keeps a non-empty history whose bottom snapshot is
/// iteration 0. Each call runs to completion; none of them blocks.
pub trait Optimiser {
    /// Short algorithm name
    fn name(&self) -> &'static str;

    /// Record one more iteration unless the cap has been reached
    fn step(&mut self) -> StepOutcome;

    /// Drop the newest snapshot. Returns `false` at the seed.
    fn rewind(&mut self) -> bool;

    /// Discard history and reseed at iteration 0
    fn reset(&mut self);

    /// Reseed with a different population size.
    ///
    /// Returns `Ok(true)` when history was replaced, `Ok(false)` when the
    /// size already matched.
    fn reconfigure(&mut self, particle_count: usize) -> Result<bool>;

    /// Newest snapshot and the live configuration
    fn current_state(&self) -> (&Swarm, &RunConfig);

    /// Every recorded snapshot, oldest first
    fn history(&self) -> &History;

    fn status(&self) -> StatusSummary;

    /// Serialize configuration and history to the run-file text format
    fn encode_run(&self) -> String;

    /// Replace configuration and history with a decoded run.
    ///
    /// On error the optimiser is left exactly as it was.
    fn restore_run(&mut self, text: &str) -> Result<LoadReport>;
}
