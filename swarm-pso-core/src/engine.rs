//! Stepping engine
//!
//! Builds swarm snapshots: [`initialise`] seeds iteration 0, [`advance`]
//! derives the next snapshot from the current one and [`rebuild`] replays a
//! stored trajectory to recover personal and global bests.
//!
//! ## Update rule
//!
//! Per particle and per axis, with `r1, r2` drawn uniformly from `[0, 1)`:
//!
//! ```text
//! cognitive = c1 * r1 * (personal_best - position)
//! social    = c2 * r2 * (global_best   - position)
//! position  = position + w * (cognitive + social)
//! ```
//!
//! There is no persisted velocity. Every particle in a step sees the global
//! best as it stood before the step; improvements found during the step are
//! applied once the whole swarm has moved, so the result does not depend on
//! particle order.

use alloc::vec::Vec;

use rand::Rng;
use rand_core::RngCore;

use crate::config::{GlobalBest, RunConfig};
use crate::history::History;
use crate::swarm::{Particle, Point, Swarm};
use crate::traits::FitnessFunction;
use crate::{Error, Result};

/// Seed `count` particles uniformly inside the configured bounds.
///
/// The run's global best is updated from the fresh population.
pub fn initialise<F, R>(count: usize, config: &mut RunConfig, fitness: &F, rng: &mut R) -> Swarm
where
    F: FitnessFunction + ?Sized,
    R: RngCore,
{
    let bounds = config.bounds;
    let mut particles = Vec::with_capacity(count);

    for _ in 0..count {
        let position = Point::new(
            rng.gen_range(f64::from(bounds.min_x)..=f64::from(bounds.max_x)),
            rng.gen_range(f64::from(bounds.min_y)..=f64::from(bounds.max_y)),
        );
        let particle = Particle::at(position, fitness.evaluate(position, config));
        config
            .global_best
            .offer(particle.best_position, particle.best_fitness);
        particles.push(particle);
    }

    tracing::debug!(
        particles = count,
        global_best = config.global_best.fitness,
        "seeded swarm"
    );

    Swarm::new(particles, 0)
}

/// Derive the snapshot after `current`.
///
/// Returns `None` once `current` has reached the iteration cap; the caller
/// leaves its history untouched in that case.
pub fn advance<F, R>(
    current: &Swarm,
    config: &mut RunConfig,
    fitness: &F,
    rng: &mut R,
) -> Option<Swarm>
where
    F: FitnessFunction + ?Sized,
    R: RngCore,
{
    if current.iteration >= config.max_iterations {
        return None;
    }

    let leader = config.global_best;
    let mut improvement = leader;
    let mut particles = Vec::with_capacity(current.len());

    for particle in &current.particles {
        let position = Point::new(
            pull(
                particle.position.x,
                particle.best_position.x,
                leader.position.x,
                config,
                rng,
            ),
            pull(
                particle.position.y,
                particle.best_position.y,
                leader.position.y,
                config,
                rng,
            ),
        );
        let cost = fitness.evaluate(position, config);

        let mut next = *particle;
        next.move_to(position, cost);
        improvement.offer(position, cost);
        particles.push(next);
    }

    if improvement.fitness < leader.fitness {
        config.global_best = improvement;
    }

    Some(Swarm::new(particles, current.iteration + 1))
}

/// One axis of the position update
fn pull<R: RngCore>(
    position: f64,
    personal_best: f64,
    global_best: f64,
    config: &RunConfig,
    rng: &mut R,
) -> f64 {
    let r1: f64 = rng.gen();
    let r2: f64 = rng.gen();
    let cognitive = config.cognitive_factor * r1 * (personal_best - position);
    let social = config.social_factor * r2 * (global_best - position);
    position + config.inertia_weight * (cognitive + social)
}

/// Rebuild a history from stored positions, oldest snapshot first.
///
/// Personal bests are replayed along each particle's trajectory and the
/// global best is reset, then seeded from the newest snapshot's personal
/// bests.
pub fn rebuild<F>(trajectory: &[Vec<Point>], config: &mut RunConfig, fitness: &F) -> Result<History>
where
    F: FitnessFunction + ?Sized,
{
    let mut rows = trajectory.iter();
    let seed_row = rows.next().ok_or(Error::EmptyHistory)?;

    let seed = seed_row
        .iter()
        .map(|&p| Particle::at(p, fitness.evaluate(p, config)))
        .collect();
    let mut history = History::seeded(Swarm::new(seed, 0));

    for (offset, row) in rows.enumerate() {
        let previous = history.top()?;
        let particles = previous
            .particles
            .iter()
            .zip(row)
            .map(|(prev, &p)| {
                let mut next = *prev;
                next.move_to(p, fitness.evaluate(p, config));
                next
            })
            .collect();
        history.push(Swarm::new(particles, offset + 1));
    }

    config.global_best = GlobalBest::UNSET;
    for particle in &history.top()?.particles {
        config
            .global_best
            .offer(particle.best_position, particle.best_fitness);
    }

    Ok(history)
}
