//! Run-file codec
//!
//! Line-oriented, comma-separated text. A `key,value` header block carries
//! the run configuration, a blank line ends it, and each following line
//! holds one snapshot's positions as `x0,y0,x1,y1,...` (oldest first).
//!
//! ```text
//! n_particles,2
//! cognitive_factor,0.5
//! ...
//! goal_y,0
//!
//! 1.5,2,-3,4
//! 1.25,2.5,-2,3
//! ```
//!
//! Only positions are stored. Personal and global bests are recovered on
//! load by replaying the trajectory (see [`crate::engine::rebuild`]).
//!
//! Decoding rules:
//! - unknown header keys are ignored, missing ones keep their defaults
//! - a known key with an unparsable value fails the whole decode
//! - a data line with the wrong token count or a bad token is skipped

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Display, Write};
use core::str::FromStr;

use crate::config::RunConfig;
use crate::history::History;
use crate::swarm::Point;
use crate::{Error, Result};

const KEY_PARTICLES: &str = "n_particles";
const KEY_COGNITIVE: &str = "cognitive_factor";
const KEY_SOCIAL: &str = "social_factor";
const KEY_INERTIA: &str = "inertia_weight";
const KEY_INTERVAL: &str = "seconds_per_iteration";
const KEY_MIN_X: &str = "min_x";
const KEY_MAX_X: &str = "max_x";
const KEY_MIN_Y: &str = "min_y";
const KEY_MAX_Y: &str = "max_y";
const KEY_MAX_ITERATIONS: &str = "max_iterations";
const KEY_GOAL_X: &str = "goal_x";
const KEY_GOAL_Y: &str = "goal_y";

/// A data line that was dropped while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line: usize,
    pub reason: String,
}

/// A decoded run, before bests are reconstructed
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRun {
    pub config: RunConfig,
    /// Particle positions per snapshot, oldest first
    pub trajectory: Vec<Vec<Point>>,
    pub skipped: Vec<SkippedLine>,
}

/// Summary of a completed restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of snapshots now in history
    pub snapshots: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Render a configuration and its history as run-file text.
pub fn encode(config: &RunConfig, history: &History) -> String {
    let mut out = String::new();

    push_field(&mut out, KEY_PARTICLES, config.particle_count);
    push_field(&mut out, KEY_COGNITIVE, config.cognitive_factor);
    push_field(&mut out, KEY_SOCIAL, config.social_factor);
    push_field(&mut out, KEY_INERTIA, config.inertia_weight);
    push_field(&mut out, KEY_INTERVAL, config.step_interval_seconds);
    push_field(&mut out, KEY_MIN_X, config.bounds.min_x);
    push_field(&mut out, KEY_MAX_X, config.bounds.max_x);
    push_field(&mut out, KEY_MIN_Y, config.bounds.min_y);
    push_field(&mut out, KEY_MAX_Y, config.bounds.max_y);
    push_field(&mut out, KEY_MAX_ITERATIONS, config.max_iterations);
    push_field(&mut out, KEY_GOAL_X, config.goal.x);
    push_field(&mut out, KEY_GOAL_Y, config.goal.y);
    out.push('\n');

    for swarm in history {
        for (i, p) in swarm.positions().enumerate() {
            if i > 0 {
                out.push(',');
            }
            // Writing to a String cannot fail.
            let _ = write!(out, "{},{}", p.x, p.y);
        }
        out.push('\n');
    }

    out
}

fn push_field(out: &mut String, key: &str, value: impl Display) {
    let _ = writeln!(out, "{key},{value}");
}

/// Parse run-file text.
///
/// Fails with [`Error::MalformedRecord`] when the header is unusable or
/// when no data line survives.
pub fn decode(text: &str) -> Result<DecodedRun> {
    let mut config = RunConfig::default();
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    for (number, line) in lines.by_ref() {
        if line.is_empty() {
            break;
        }
        apply_header_line(&mut config, number, line)?;
    }

    config.validate().map_err(|e| Error::MalformedRecord {
        line: 0,
        reason: format!("invalid header: {e}"),
    })?;

    let width = config
        .particle_count
        .checked_mul(2)
        .ok_or_else(|| Error::MalformedRecord {
            line: 0,
            reason: format!("particle count {} is too large", config.particle_count),
        })?;
    let mut trajectory = Vec::new();
    let mut skipped = Vec::new();

    for (number, line) in lines {
        if line.is_empty() {
            continue;
        }
        match parse_positions(line, width) {
            Ok(row) => trajectory.push(row),
            Err(reason) => {
                tracing::warn!(line = number, %reason, "skipping malformed snapshot line");
                skipped.push(SkippedLine {
                    line: number,
                    reason,
                });
            }
        }
    }

    if trajectory.is_empty() {
        return Err(Error::MalformedRecord {
            line: 0,
            reason: "no snapshot lines".into(),
        });
    }

    Ok(DecodedRun {
        config,
        trajectory,
        skipped,
    })
}

fn apply_header_line(config: &mut RunConfig, line: usize, text: &str) -> Result<()> {
    let (key, value) = match text.split_once(',') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (text, ""),
    };

    match key {
        KEY_PARTICLES => config.particle_count = parse_value(key, value, line)?,
        KEY_COGNITIVE => config.cognitive_factor = parse_value(key, value, line)?,
        KEY_SOCIAL => config.social_factor = parse_value(key, value, line)?,
        KEY_INERTIA => config.inertia_weight = parse_value(key, value, line)?,
        KEY_INTERVAL => config.step_interval_seconds = parse_value(key, value, line)?,
        KEY_MIN_X => config.bounds.min_x = parse_value(key, value, line)?,
        KEY_MAX_X => config.bounds.max_x = parse_value(key, value, line)?,
        KEY_MIN_Y => config.bounds.min_y = parse_value(key, value, line)?,
        KEY_MAX_Y => config.bounds.max_y = parse_value(key, value, line)?,
        KEY_MAX_ITERATIONS => config.max_iterations = parse_value(key, value, line)?,
        KEY_GOAL_X => config.goal.x = parse_value(key, value, line)?,
        KEY_GOAL_Y => config.goal.y = parse_value(key, value, line)?,
        other => tracing::debug!(line, key = other, "ignoring unknown header key"),
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str, line: usize) -> Result<T> {
    value.parse().map_err(|_| Error::MalformedRecord {
        line,
        reason: format!("bad value {value:?} for {key}"),
    })
}

fn parse_positions(line: &str, width: usize) -> core::result::Result<Vec<Point>, String> {
    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
    if tokens.len() != width {
        return Err(format!("expected {width} values, found {}", tokens.len()));
    }

    let mut values = Vec::with_capacity(width);
    for token in tokens {
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(v),
            _ => return Err(format!("bad coordinate {token:?}")),
        }
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

impl Display for SkippedLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl Display for LoadReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} snapshots", self.snapshots)?;
        if !self.skipped.is_empty() {
            write!(f, ", {} malformed lines skipped", self.skipped.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;
    use crate::swarm::{Particle, Swarm};
    use alloc::vec;

    fn two_step_history() -> History {
        let mut history = History::seeded(Swarm::new(
            vec![
                Particle::at(Point::new(1.5, 2.0), 0.0),
                Particle::at(Point::new(-3.0, 4.0), 0.0),
            ],
            0,
        ));
        history.push(Swarm::new(
            vec![
                Particle::at(Point::new(1.25, 2.5), 0.0),
                Particle::at(Point::new(-2.0, 3.0), 0.0),
            ],
            1,
        ));
        history
    }

    fn two_particle_config() -> RunConfig {
        RunConfig::builder()
            .particle_count(2)
            .coefficients(0.25, 0.75, 0.5)
            .step_interval_seconds(0.5)
            .bounds(-10, 10, -20, 20)
            .max_iterations(7)
            .goal(1.0, -1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn encode_writes_header_then_rows() {
        let text = encode(&two_particle_config(), &two_step_history());
        let expected = "n_particles,2\n\
                        cognitive_factor,0.25\n\
                        social_factor,0.75\n\
                        inertia_weight,0.5\n\
                        seconds_per_iteration,0.5\n\
                        min_x,-10\n\
                        max_x,10\n\
                        min_y,-20\n\
                        max_y,20\n\
                        max_iterations,7\n\
                        goal_x,1\n\
                        goal_y,-1\n\
                        \n\
                        1.5,2,-3,4\n\
                        1.25,2.5,-2,3\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn decode_reads_back_config_and_positions() {
        let config = two_particle_config();
        let text = encode(&config, &two_step_history());
        let decoded = decode(&text).unwrap();

        assert!(decoded.config.same_settings(&config));
        assert!(decoded.skipped.is_empty());
        assert_eq!(
            decoded.trajectory,
            vec![
                vec![Point::new(1.5, 2.0), Point::new(-3.0, 4.0)],
                vec![Point::new(1.25, 2.5), Point::new(-2.0, 3.0)],
            ]
        );
    }

    #[test]
    fn decode_ignores_unknown_keys_and_defaults_missing_ones() {
        let text = "n_particles,1\ncolour,blue\n\n0.5,0.5\n";
        let decoded = decode(text).unwrap();

        let defaults = RunConfig::default();
        assert_eq!(decoded.config.particle_count, 1);
        assert_eq!(decoded.config.bounds, Bounds::default());
        assert_eq!(decoded.config.max_iterations, defaults.max_iterations);
        assert_eq!(decoded.trajectory.len(), 1);
    }

    #[test]
    fn decode_skips_malformed_rows() {
        let text = "n_particles,2\n\n1,2,3,4\n1,2,3\n1,2,x,4\n\n\n5,6,7,8\n";
        let decoded = decode(text).unwrap();

        assert_eq!(decoded.trajectory.len(), 2);
        assert_eq!(decoded.trajectory[1][0], Point::new(5.0, 6.0));
        let lines: Vec<usize> = decoded.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![4, 5]);
    }

    #[test]
    fn decode_accepts_reference_padding() {
        // Older writers pad the header with several blank lines.
        let text = "n_particles,1\n\n\n\n\n0.000000,1.000000\n2.000000,3.000000\n";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.trajectory.len(), 2);
    }

    #[test]
    fn decode_rejects_bad_header_value() {
        let text = "n_particles,many\n\n1,2\n";
        assert!(matches!(
            decode(text),
            Err(Error::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn decode_rejects_invalid_header_bounds() {
        let text = "n_particles,1\nmin_x,5\nmax_x,5\n\n1,2\n";
        assert!(matches!(decode(text), Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn decode_rejects_zero_particles() {
        let text = "n_particles,0\n\n\n";
        assert!(matches!(decode(text), Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn decode_without_rows_is_malformed() {
        let text = "n_particles,1\n\n1,2,3\n";
        match decode(text) {
            Err(Error::MalformedRecord { line, reason }) => {
                assert_eq!(line, 0);
                assert_eq!(reason, "no snapshot lines");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_huge_particle_count() {
        let text = "n_particles,18446744073709551615\n\n1,2\n";
        assert!(matches!(
            decode(text),
            Err(Error::MalformedRecord { line: 0, .. })
        ));

        let text = "n_particles,1000001\n\n1,2\n";
        assert!(matches!(
            decode(text),
            Err(Error::MalformedRecord { line: 0, .. })
        ));
    }

    #[test]
    fn load_report_summary() {
        let report = LoadReport {
            snapshots: 3,
            skipped: vec![SkippedLine {
                line: 14,
                reason: "expected 2 values, found 1".into(),
            }],
        };
        assert_eq!(report.to_string(), "3 snapshots, 1 malformed lines skipped");
        assert_eq!(report.skipped[0].to_string(), "line 14: expected 2 values, found 1");
    }
}
