//! Run configuration
//!
//! [`RunConfig`] bundles the PSO coefficients, search bounds, goal and
//! iteration cap for one run, plus the run's global best. The global best
//! lives here rather than in a snapshot: rewinding history never makes it
//! worse.

use alloc::format;

use serde::{Deserialize, Serialize};

use crate::swarm::Point;
use crate::{Error, Result};

/// Largest swarm a run may hold
pub const MAX_PARTICLES: usize = 1_000_000;

/// Axis-aligned integer search bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Create bounds, rejecting empty or inverted ranges.
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Result<Self> {
        let bounds = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_x >= self.max_x {
            return Err(Error::InvalidConfiguration(format!(
                "min_x ({}) must be below max_x ({})",
                self.min_x, self.max_x
            )));
        }
        if self.min_y >= self.max_y {
            return Err(Error::InvalidConfiguration(format!(
                "min_y ({}) must be below max_y ({})",
                self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    /// Whether `point` lies inside the bounds (inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= f64::from(self.min_x)
            && point.x <= f64::from(self.max_x)
            && point.y >= f64::from(self.min_y)
            && point.y <= f64::from(self.max_y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: -64,
            max_x: 64,
            min_y: -64,
            max_y: 64,
        }
    }
}

/// Best position found so far in a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalBest {
    pub position: Point,
    pub fitness: f64,
}

impl GlobalBest {
    /// Sentinel worse than any real fitness
    pub const UNSET: GlobalBest = GlobalBest {
        position: Point::ORIGIN,
        fitness: f64::INFINITY,
    };

    pub fn is_set(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Replace the global best if `fitness` is strictly lower.
    pub fn offer(&mut self, position: Point, fitness: f64) -> bool {
        if fitness < self.fitness {
            self.position = position;
            self.fitness = fitness;
            true
        } else {
            false
        }
    }
}

impl Default for GlobalBest {
    fn default() -> Self {
        Self::UNSET
    }
}

/// Parameter bundle for one optimisation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of particles seeded on reset
    pub particle_count: usize,
    /// Pull toward each particle's personal best
    pub cognitive_factor: f64,
    /// Pull toward the global best
    pub social_factor: f64,
    /// Scaling applied to the combined pull
    pub inertia_weight: f64,
    /// Wall-clock pacing hint for automatic stepping
    pub step_interval_seconds: f64,
    pub bounds: Bounds,
    /// Iteration at which stepping stops
    pub max_iterations: usize,
    /// Target point, read by the fitness function
    pub goal: Point,
    pub global_best: GlobalBest,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            particle_count: 5,
            cognitive_factor: 0.5,
            social_factor: 0.8,
            inertia_weight: 0.5,
            step_interval_seconds: 1.0,
            bounds: Bounds::default(),
            max_iterations: 1000,
            goal: Point::ORIGIN,
            global_best: GlobalBest::UNSET,
        }
    }
}

impl RunConfig {
    /// Create a new builder
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        validate_particle_count(self.particle_count)?;
        self.bounds.validate()
    }

    /// Whether `other` carries the same persisted settings.
    ///
    /// The global best is run state and is not compared.
    pub fn same_settings(&self, other: &RunConfig) -> bool {
        self.particle_count == other.particle_count
            && self.cognitive_factor == other.cognitive_factor
            && self.social_factor == other.social_factor
            && self.inertia_weight == other.inertia_weight
            && self.step_interval_seconds == other.step_interval_seconds
            && self.bounds == other.bounds
            && self.max_iterations == other.max_iterations
            && self.goal == other.goal
    }
}

/// Reject swarm sizes outside `1..=MAX_PARTICLES`.
pub fn validate_particle_count(count: usize) -> Result<()> {
    if count < 1 {
        return Err(Error::InvalidConfiguration(
            "particle count must be at least 1".into(),
        ));
    }
    if count > MAX_PARTICLES {
        return Err(Error::InvalidConfiguration(format!(
            "particle count {count} exceeds the limit of {MAX_PARTICLES}"
        )));
    }
    Ok(())
}

/// Builder for [`RunConfig`]
#[derive(Debug, Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Create a new builder seeded with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the swarm size
    pub fn particle_count(mut self, count: usize) -> Self {
        self.config.particle_count = count;
        self
    }

    /// Set cognitive, social and inertia coefficients
    pub fn coefficients(mut self, cognitive: f64, social: f64, inertia: f64) -> Self {
        self.config.cognitive_factor = cognitive;
        self.config.social_factor = social;
        self.config.inertia_weight = inertia;
        self
    }

    pub fn step_interval_seconds(mut self, seconds: f64) -> Self {
        self.config.step_interval_seconds = seconds;
        self
    }

    /// Set the search bounds
    pub fn bounds(mut self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        self.config.bounds = Bounds {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        self
    }

    /// Set the iteration cap
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the goal point
    pub fn goal(mut self, x: f64, y: f64) -> Self {
        self.config.goal = Point::new(x, y);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<RunConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
