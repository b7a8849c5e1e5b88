//! Integration tests for saving and restoring runs through the file system.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use swarm_pso::prelude::*;

fn temp_dir(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push(format!("swarmpso_{prefix}_{pid}_{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn scenario_config() -> RunConfig {
    RunConfig::builder()
        .particle_count(1)
        .bounds(0, 10, 0, 10)
        .goal(5.0, 5.0)
        .max_iterations(3)
        .build()
        .unwrap()
}

#[test]
fn save_then_load_reproduces_the_run() {
    let dir = temp_dir("save_then_load");
    let path = dir.join("cycles.csv");

    let config = RunConfig::builder()
        .particle_count(7)
        .coefficients(0.3, 0.9, 0.6)
        .step_interval_seconds(0.2)
        .bounds(-30, 25, -5, 40)
        .max_iterations(25)
        .goal(3.25, 12.5)
        .build()
        .unwrap();
    let mut pso = seeded_swarm(config, 31).unwrap();
    for _ in 0..12 {
        pso.step();
    }
    let before = pso.history().clone();
    pso.save(&path).unwrap();

    // Saving does not disturb the stack.
    assert_eq!(pso.history(), &before);

    let mut restored = seeded_swarm(RunConfig::default(), 99).unwrap();
    let report = restored.load(&path).unwrap();

    assert_eq!(report.snapshots, 13);
    assert!(report.skipped.is_empty());
    assert!(restored.config().same_settings(pso.config()));
    assert_eq!(restored.history().len(), pso.history().len());
    for (a, b) in restored.history().iter().zip(pso.history().iter()) {
        assert_eq!(a.iteration, b.iteration);
        for (pa, pb) in a.positions().zip(b.positions()) {
            assert!((pa.x - pb.x).abs() < 1e-9);
            assert!((pa.y - pb.y).abs() < 1e-9);
        }
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn restored_run_keeps_stepping() {
    let dir = temp_dir("restored_run_keeps_stepping");
    let path = dir.join("cycles.csv");

    let mut pso = seeded_swarm(scenario_config(), 5).unwrap();
    pso.step();
    pso.save(&path).unwrap();

    let mut restored = seeded_swarm(RunConfig::default(), 6).unwrap();
    restored.load(&path).unwrap();
    assert_eq!(restored.status().iteration, 1);

    assert!(restored.step().advanced());
    assert!(restored.step().advanced());
    assert!(!restored.step().advanced());
    assert_eq!(restored.history().len(), 4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn load_skips_malformed_lines_and_reports_them() {
    let dir = temp_dir("load_skips_malformed");
    let path = dir.join("cycles.csv");
    fs::write(
        &path,
        "n_particles,2\nmin_x,0\nmax_x,10\nmin_y,0\nmax_y,10\n\n\
         1,1,2,2\n\
         3,3\n\
         4,4,5,5\n",
    )
    .unwrap();

    let mut pso = seeded_swarm(RunConfig::default(), 1).unwrap();
    let report = pso.load(&path).unwrap();

    assert_eq!(report.snapshots, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 8);

    let (top, config) = pso.current_state();
    assert_eq!(top.iteration, 1);
    assert_eq!(config.particle_count, 2);
    assert_eq!(top.particles[1].position, Point::new(5.0, 5.0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn load_with_bad_header_keeps_state() {
    let dir = temp_dir("load_with_bad_header");
    let path = dir.join("cycles.csv");
    fs::write(&path, "n_particles,2\nmax_iterations,lots\n\n1,1,2,2\n").unwrap();

    let mut pso = seeded_swarm(RunConfig::default(), 1).unwrap();
    pso.step();
    let before = pso.history().clone();

    let result = pso.load(&path);
    assert!(matches!(
        result,
        Err(RunError::Core(swarm_pso::core::Error::MalformedRecord { line: 2, .. }))
    ));
    assert_eq!(pso.history(), &before);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn loads_fixed_precision_files_with_padding() {
    // Six-decimal floats and four blank lines after the header.
    let dir = temp_dir("loads_fixed_precision");
    let path = dir.join("cycles.csv");
    fs::write(
        &path,
        "n_particles,1\n\
         cognitive_factor,0.500000\n\
         social_factor,0.800000\n\
         inertia_weight,0.500000\n\
         seconds_per_iteration,1.000000\n\
         min_x,-64\n\
         max_x,64\n\
         min_y,-64\n\
         max_y,64\n\
         max_iterations,1000\n\
         goal_x,0.000000\n\
         goal_y,0.000000\n\
         \n\n\n\n\
         3.000000,4.000000\n\
         1.500000,2.000000\n",
    )
    .unwrap();

    let mut pso = seeded_swarm(RunConfig::default(), 1).unwrap();
    let report = pso.load(&path).unwrap();
    assert_eq!(report.snapshots, 2);

    let config = pso.config();
    assert_eq!(config.global_best.position, Point::new(1.5, 2.0));
    assert!((config.global_best.fitness - 2.5).abs() < 1e-12);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn single_particle_scenario_survives_a_round_trip() {
    let dir = temp_dir("single_particle_scenario");
    let path = dir.join("cycles.csv");

    let mut pso = seeded_swarm(scenario_config(), 2024).unwrap();
    let seed = pso.current_state().0.clone();

    for _ in 0..3 {
        assert!(pso.step().advanced());
    }
    assert!(!pso.step().advanced());
    assert_eq!(pso.history().len(), 4);

    pso.save(&path).unwrap();
    let mut restored = seeded_swarm(RunConfig::default(), 1).unwrap();
    restored.load(&path).unwrap();

    for _ in 0..3 {
        assert!(restored.rewind());
    }
    assert!(!restored.rewind());
    assert_eq!(restored.history().len(), 1);
    assert_eq!(restored.current_state().0, &seed);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn boxed_optimisers_save_and_load() {
    let dir = temp_dir("boxed_optimisers");
    let path = dir.join("cycles.csv");

    let mut opt =
        build_optimiser(AlgorithmKind::ParticleSwarm, scenario_config(), Some(3)).unwrap();
    opt.step();
    opt.save(&path).unwrap();

    let mut other =
        build_optimiser(AlgorithmKind::ParticleSwarm, RunConfig::default(), None).unwrap();
    other.load(&path).unwrap();
    assert_eq!(other.history(), opt.history());

    let _ = fs::remove_dir_all(&dir);
}
