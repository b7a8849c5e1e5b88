//! Swarm state model
//!
//! A [`Swarm`] is one immutable snapshot of the population at a given
//! iteration. The engine never edits a snapshot that has been recorded; it
//! always builds the next one from a copy.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// A point in the 2-D search space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Origin of the search space
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One candidate solution, carrying its own best-ever result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Current position
    pub position: Point,
    /// Lowest-fitness position this particle has visited
    pub best_position: Point,
    /// Fitness at `best_position`
    pub best_fitness: f64,
}

impl Particle {
    /// A particle that has only ever been at `position`
    pub fn at(position: Point, fitness: f64) -> Self {
        Self {
            position,
            best_position: position,
            best_fitness: fitness,
        }
    }

    /// Move to `position`, keeping the personal best if the new spot is not
    /// strictly better.
    ///
    /// Returns `true` when the personal best improved.
    pub fn move_to(&mut self, position: Point, fitness: f64) -> bool {
        self.position = position;
        if fitness < self.best_fitness {
            self.best_position = position;
            self.best_fitness = fitness;
            true
        } else {
            false
        }
    }
}

/// The full set of particles at one iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swarm {
    /// Particles in index order
    pub particles: Vec<Particle>,
    /// Depth of this snapshot in its history (0 for the seed)
    pub iteration: usize,
}

impl Swarm {
    pub fn new(particles: Vec<Particle>, iteration: usize) -> Self {
        Self {
            particles,
            iteration,
        }
    }

    /// Number of particles in the snapshot
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current particle positions in index order
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    /// The particle with the lowest personal best, first index on ties
    pub fn best_particle(&self) -> Option<&Particle> {
        self.particles.iter().fold(None, |best: Option<&Particle>, p| match best {
            Some(b) if b.best_fitness <= p.best_fitness => Some(b),
            _ => Some(p),
        })
    }
}
