//! Snapshot history
//!
//! An append/pop stack of immutable [`Swarm`] snapshots. The stack owns its
//! snapshots outright, so popping or clearing releases their particle
//! storage exactly once.
//!
//! ## Invariants
//!
//! - Snapshot `k` (0-based from the bottom) has `iteration == k`
//! - Popping never removes the seed snapshot

use alloc::vec::Vec;

use crate::swarm::Swarm;
use crate::{Error, Result};

/// Ordered store of swarm snapshots, bottom = iteration 0
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    snapshots: Vec<Swarm>,
}

impl History {
    /// Create an empty, unseeded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history holding only `seed`
    pub fn seeded(seed: Swarm) -> Self {
        let mut history = Self::new();
        history.push(seed);
        history
    }

    /// Append a snapshot to the top.
    ///
    /// The snapshot's iteration must equal the current depth.
    pub fn push(&mut self, snapshot: Swarm) {
        debug_assert_eq!(
            snapshot.iteration,
            self.snapshots.len(),
            "snapshot iteration must match its depth"
        );
        self.snapshots.push(snapshot);
    }

    /// Remove the top snapshot if more than one remains.
    pub fn pop(&mut self) -> bool {
        if self.snapshots.len() > 1 {
            self.snapshots.pop();
            true
        } else {
            false
        }
    }

    /// Most recent snapshot
    pub fn top(&self) -> Result<&Swarm> {
        self.snapshots.last().ok_or(Error::EmptyHistory)
    }

    /// Release every snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Clear and push a fresh seed in one go
    pub fn reseed(&mut self, seed: Swarm) {
        self.clear();
        self.push(seed);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot recorded at `iteration`
    pub fn get(&self, iteration: usize) -> Option<&Swarm> {
        self.snapshots.get(iteration)
    }

    /// Snapshots oldest first
    pub fn iter(&self) -> core::slice::Iter<'_, Swarm> {
        self.snapshots.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Swarm;
    type IntoIter = core::slice::Iter<'a, Swarm>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
