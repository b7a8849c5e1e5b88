//! Hello PSO Example
//!
//! Runs a small swarm toward a goal, rewinds a few steps and prints the
//! status line a front end would show.

use swarm_pso::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SwarmPSO Hello Example");
    println!("======================");

    let config = RunConfig::builder()
        .particle_count(12)
        .coefficients(0.5, 0.8, 0.5)
        .bounds(-20, 20, -20, 20)
        .goal(7.5, -3.0)
        .max_iterations(40)
        .build()?;

    println!("Configuration:");
    println!("  Particles: {}", config.particle_count);
    println!("  Goal: ({}, {})", config.goal.x, config.goal.y);
    println!("  Max iterations: {}", config.max_iterations);

    let mut pso = seeded_swarm(config, 2024)?;
    while pso.step().advanced() {}
    println!("\nAfter stepping: {}", pso.status());

    for _ in 0..10 {
        pso.rewind();
    }
    println!("After rewinding 10 steps: {}", pso.status());

    let best = pso.config().global_best;
    println!(
        "\nBest position found: ({:.4}, {:.4})",
        best.position.x, best.position.y
    );

    Ok(())
}
