//! # SwarmPSO Core
//!
//! Core particle swarm stepping engine for SwarmPSO.
//!
//! This crate is `no_std` compatible (it needs `alloc`) and provides:
//! - The swarm state model (particles, snapshots, run configuration)
//! - The PSO update rule and swarm initialisation
//! - A rewindable history of immutable snapshots
//! - The text codec used for run files
//! - The [`Optimiser`](traits::Optimiser) capability set and its PSO implementation
//!
//! ## Feature Flags
//!
//! - `std` (default): Enable standard library support and the built-in
//!   [`DistanceToGoal`](traits::DistanceToGoal) fitness function

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod codec;
pub mod config;
pub mod engine;
pub mod history;
pub mod pso;
pub mod swarm;
pub mod traits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{LoadReport, SkippedLine};
    pub use crate::config::{Bounds, GlobalBest, RunConfig, RunConfigBuilder};
    pub use crate::history::History;
    pub use crate::pso::ParticleSwarm;
    pub use crate::swarm::{Particle, Point, Swarm};
    pub use crate::traits::*;
}

/// Result type for SwarmPSO core operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for SwarmPSO core operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configuration value is out of range; prior state is kept
    InvalidConfiguration(alloc::string::String),
    /// A run-file record could not be used
    MalformedRecord {
        /// 1-based input line, 0 when the header as a whole is invalid
        line: usize,
        reason: alloc::string::String,
    },
    /// History had no snapshot to read
    EmptyHistory,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidConfiguration(reason) => write!(f, "invalid configuration: {reason}"),
            Error::MalformedRecord { line: 0, reason } => write!(f, "malformed record: {reason}"),
            Error::MalformedRecord { line, reason } => {
                write!(f, "malformed record at line {line}: {reason}")
            }
            Error::EmptyHistory => write!(f, "history holds no snapshots"),
        }
    }
}
