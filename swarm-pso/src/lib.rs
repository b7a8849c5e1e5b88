//! # SwarmPSO
//!
//! **Interactive particle swarm optimisation with a rewindable history and
//! plain-text run files.**
//!
//! SwarmPSO evolves a swarm of candidate points toward the minimum of a
//! fitness function over a 2-D search space. Every iteration is kept as an
//! immutable snapshot, so a front end can step forward, rewind, reset and
//! save or restore the full trajectory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swarm_pso::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     let config = RunConfig::builder()
//!         .particle_count(20)
//!         .goal(12.0, -8.0)
//!         .max_iterations(200)
//!         .build()?;
//!
//!     let mut pso = swarm_pso::seeded_swarm(config, 42)?;
//!     while pso.step().advanced() {}
//!     pso.save(std::path::Path::new("cycles.csv"))?;
//!     println!("{}", pso.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`swarm_pso_core`]: engine, history, codec and the `Optimiser` trait (no_std compatible)
//! - [`persist`]: run files on disk
//! - [`cadence`]: pacing helpers for automatic playback

#![forbid(unsafe_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

// Re-export the core crate
pub use swarm_pso_core as core;

// Re-export commonly used items at the top level
pub use swarm_pso_core::{
    codec::{LoadReport, SkippedLine},
    config::{Bounds, GlobalBest, RunConfig, RunConfigBuilder},
    history::History,
    pso::ParticleSwarm,
    swarm::{Particle, Point, Swarm},
    traits::{DistanceToGoal, FitnessFunction, Optimiser, StatusSummary, StepOutcome},
};

pub mod cadence;
pub mod error;
pub mod persist;

pub use error::RunError;
pub use persist::RunFile;

/// Prelude module for convenient imports
///
/// ```rust
/// use swarm_pso::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::prelude::*;

    pub use crate::cadence::{frame_due, Clock, StepTimer, SystemClock};
    pub use crate::persist::RunFile;
    pub use crate::{build_optimiser, seeded_swarm, AlgorithmKind, DefaultSwarm, RunError};
}

/// PSO over the distance to the configured goal, with the standard RNG
pub type DefaultSwarm = ParticleSwarm<DistanceToGoal, StdRng>;

/// Build a goal-seeking swarm with a reproducible random source
pub fn seeded_swarm(config: RunConfig, seed: u64) -> Result<DefaultSwarm, RunError> {
    Ok(ParticleSwarm::new(
        config,
        DistanceToGoal,
        StdRng::seed_from_u64(seed),
    )?)
}

/// Build a goal-seeking swarm seeded from OS entropy
pub fn entropy_swarm(config: RunConfig) -> Result<DefaultSwarm, RunError> {
    Ok(ParticleSwarm::new(
        config,
        DistanceToGoal,
        StdRng::from_entropy(),
    )?)
}

/// Search algorithms a front end can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmKind {
    /// Particle swarm optimisation
    #[default]
    ParticleSwarm,
}

impl AlgorithmKind {
    /// Every selectable algorithm
    pub const ALL: &'static [AlgorithmKind] = &[AlgorithmKind::ParticleSwarm];

    pub fn label(&self) -> &'static str {
        match self {
            AlgorithmKind::ParticleSwarm => "Particle Swarm Optimisation",
        }
    }
}

impl std::str::FromStr for AlgorithmKind {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pso" | "particle-swarm" => Ok(AlgorithmKind::ParticleSwarm),
            other => Err(swarm_pso_core::Error::InvalidConfiguration(format!(
                "unknown algorithm: {other}"
            ))
            .into()),
        }
    }
}

/// Build an optimiser of the given kind behind the common capability set.
///
/// `seed` fixes the random source; `None` seeds from OS entropy.
pub fn build_optimiser(
    kind: AlgorithmKind,
    config: RunConfig,
    seed: Option<u64>,
) -> Result<Box<dyn Optimiser>, RunError> {
    match kind {
        AlgorithmKind::ParticleSwarm => {
            let swarm = match seed {
                Some(seed) => seeded_swarm(config, seed)?,
                None => entropy_swarm(config)?,
            };
            Ok(Box::new(swarm))
        }
    }
}
