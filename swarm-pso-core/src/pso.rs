//! Particle swarm optimiser
//!
//! [`ParticleSwarm`] owns the run configuration, the snapshot history, the
//! fitness function and the random source, and exposes them through the
//! [`Optimiser`] capability set.

use alloc::string::String;

use rand_core::RngCore;

use crate::codec::{self, LoadReport};
use crate::config::{validate_particle_count, Bounds, GlobalBest, RunConfig};
use crate::engine;
use crate::history::History;
use crate::swarm::{Point, Swarm};
use crate::traits::{FitnessFunction, Optimiser, StatusSummary, StepOutcome};
use crate::Result;

/// Interactive PSO run with a rewindable history
#[derive(Debug)]
pub struct ParticleSwarm<F, R> {
    config: RunConfig,
    history: History,
    fitness: F,
    rng: R,
}

impl<F, R> ParticleSwarm<F, R>
where
    F: FitnessFunction,
    R: RngCore,
{
    /// Validate `config` and seed a fresh history at iteration 0.
    pub fn new(config: RunConfig, fitness: F, rng: R) -> Result<Self> {
        config.validate()?;
        let mut swarm = Self {
            config,
            history: History::new(),
            fitness,
            rng,
        };
        swarm.reseed();
        Ok(swarm)
    }

    fn reseed(&mut self) {
        self.config.global_best = GlobalBest::UNSET;
        let seed = engine::initialise(
            self.config.particle_count,
            &mut self.config,
            &self.fitness,
            &mut self.rng,
        );
        self.history.reseed(seed);
    }

    fn top(&self) -> &Swarm {
        match self.history.top() {
            Ok(swarm) => swarm,
            Err(e) => unreachable!("particle swarm history is never empty: {e}"),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// Current particle positions, for plotting
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.top().positions()
    }

    /// Update the PSO coefficients without touching history
    pub fn set_coefficients(&mut self, cognitive: f64, social: f64, inertia: f64) {
        self.config.cognitive_factor = cognitive;
        self.config.social_factor = social;
        self.config.inertia_weight = inertia;
    }

    /// Move the goal. Recorded fitness values keep their old meaning.
    pub fn set_goal(&mut self, goal: Point) {
        self.config.goal = goal;
    }

    /// Change the search bounds used by future reseeds
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<()> {
        bounds.validate()?;
        self.config.bounds = bounds;
        Ok(())
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.config.max_iterations = max_iterations;
    }

    pub fn set_step_interval(&mut self, seconds: f64) {
        self.config.step_interval_seconds = seconds;
    }
}

impl<F, R> Optimiser for ParticleSwarm<F, R>
where
    F: FitnessFunction,
    R: RngCore,
{
    fn name(&self) -> &'static str {
        "particle-swarm"
    }

    fn step(&mut self) -> StepOutcome {
        let current = match self.history.top() {
            Ok(swarm) => swarm,
            Err(e) => unreachable!("particle swarm history is never empty: {e}"),
        };

        match engine::advance(current, &mut self.config, &self.fitness, &mut self.rng) {
            Some(next) => {
                let iteration = next.iteration;
                self.history.push(next);
                tracing::debug!(
                    iteration,
                    global_best = self.config.global_best.fitness,
                    "advanced swarm"
                );
                StepOutcome::Advanced { iteration }
            }
            None => {
                let iteration = current.iteration;
                tracing::info!(
                    iteration,
                    max_iterations = self.config.max_iterations,
                    "max iterations reached"
                );
                StepOutcome::Capped { iteration }
            }
        }
    }

    fn rewind(&mut self) -> bool {
        let popped = self.history.pop();
        if popped {
            tracing::debug!(iteration = self.top().iteration, "rewound swarm");
        }
        popped
    }

    fn reset(&mut self) {
        self.reseed();
        tracing::debug!(particles = self.config.particle_count, "reset swarm");
    }

    fn reconfigure(&mut self, particle_count: usize) -> Result<bool> {
        validate_particle_count(particle_count)?;
        if particle_count == self.top().len() {
            return Ok(false);
        }

        self.config.particle_count = particle_count;
        self.reseed();
        tracing::debug!(particles = particle_count, "reconfigured swarm");
        Ok(true)
    }

    fn current_state(&self) -> (&Swarm, &RunConfig) {
        (self.top(), &self.config)
    }

    fn history(&self) -> &History {
        &self.history
    }

    fn status(&self) -> StatusSummary {
        StatusSummary {
            global_best_fitness: self.config.global_best.fitness,
            iteration: self.top().iteration,
            history_depth: self.history.len(),
            max_iterations: self.config.max_iterations,
        }
    }

    fn encode_run(&self) -> String {
        codec::encode(&self.config, &self.history)
    }

    fn restore_run(&mut self, text: &str) -> Result<LoadReport> {
        let decoded = codec::decode(text)?;
        let mut config = decoded.config;
        let history = engine::rebuild(&decoded.trajectory, &mut config, &self.fitness)?;

        self.config = config;
        self.history = history;
        tracing::debug!(
            snapshots = self.history.len(),
            skipped = decoded.skipped.len(),
            "restored run"
        );

        Ok(LoadReport {
            snapshots: self.history.len(),
            skipped: decoded.skipped,
        })
    }
}
