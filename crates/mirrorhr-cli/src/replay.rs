//! Replay recorded sensor logs through a monitoring session.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use mirrorhr_core::{DEFAULT_HRV_WINDOW, DEFAULT_MOTION_WINDOW};
use mirrorhr_vitals::{AlertMessage, AlertThresholds, MonitorSession, SessionConfig};

/// Arguments for the `replay` subcommand
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Heart-rate log: one `timestamp_secs,bpm` row per line
    #[arg(long)]
    pub heart_rate: PathBuf,

    /// Device-motion log: one `timestamp_secs,x,y,z` row per line
    #[arg(long)]
    pub motion: Option<PathBuf>,

    /// Emit readings as JSON lines instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// HRV window capacity in samples
    #[arg(long, default_value_t = DEFAULT_HRV_WINDOW)]
    pub hrv_window: usize,

    /// Motion smoothing window capacity in samples
    #[arg(long, default_value_t = DEFAULT_MOTION_WINDOW)]
    pub motion_window: usize,
}

/// One row of a recorded log.
#[derive(Debug, Clone, Copy)]
enum ReplayEvent {
    HeartRate { ts: f64, bpm: f64 },
    Acceleration { ts: f64, x: f64, y: f64, z: f64 },
}

impl ReplayEvent {
    fn timestamp(&self) -> f64 {
        match *self {
            Self::HeartRate { ts, .. } | Self::Acceleration { ts, .. } => ts,
        }
    }
}

/// Run the replay to completion.
pub fn execute(args: ReplayArgs) -> Result<()> {
    let mut events = load_heart_rate_log(&args.heart_rate)?;
    if let Some(path) = &args.motion {
        events.extend(load_motion_log(path)?);
    }
    // Interleave the streams the way the sensors delivered them.
    events.sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));

    tracing::info!(events = events.len(), "replaying recorded session");

    let config = SessionConfig {
        hrv_window: args.hrv_window,
        motion_window: args.motion_window,
        thresholds: AlertThresholds::default(),
        ..SessionConfig::default()
    };
    let mut session = MonitorSession::new(config)?;
    session.start()?;

    let mut motion_level = None;
    for event in events {
        match event {
            ReplayEvent::HeartRate { ts, bpm } => {
                let reading = session.push_heart_rate(bpm, ts)?;
                if args.json {
                    println!("{}", serde_json::to_string(&reading)?);
                } else {
                    // Placeholders until the windows have filled once
                    let hrv = reading
                        .hrv_sdnn
                        .map_or_else(|| "   --".to_string(), |v| format!("{v:5.2}"));
                    let motion = motion_level
                        .map_or_else(|| "  --".to_string(), |v: f64| format!("{v:4.2}"));
                    println!("[{ts:10.2}s] HR {bpm:5.1} BPM  HRV {hrv}  motion {motion}");
                }
            }
            ReplayEvent::Acceleration { ts, x, y, z } => {
                session
                    .push_acceleration(x, y, z)
                    .with_context(|| format!("motion sample at {ts:.2}s"))?;
                motion_level = session.motion().level();
            }
        }
    }

    let alerts = session.take_alerts();
    session.stop()?;
    print_summary(&session, &alerts, args.json)?;

    Ok(())
}

fn print_summary(session: &MonitorSession, alerts: &[AlertMessage], json: bool) -> Result<()> {
    if json {
        for alert in alerts {
            println!("{}", serde_json::to_string(alert)?);
        }
        return Ok(());
    }

    println!("\nsession summary");
    if let Some(stats) = session.store().stats() {
        println!(
            "  readings: {}  mean {:.1} BPM  range {:.0}-{:.0} BPM  hrv available {:.0}%",
            stats.count,
            stats.bpm_mean,
            stats.bpm_min,
            stats.bpm_max,
            stats.hrv_fraction * 100.0
        );
    } else {
        println!("  no readings");
    }

    for row in session.store().hourly_summaries() {
        let label = row
            .start_time()
            .map_or_else(|| format!("hour @ {}s", row.hour_start_secs), |t| {
                t.format("%Y-%m-%d %H:%M UTC").to_string()
            });
        println!(
            "  {label}  min {:.0} max {:.0} ({} readings)",
            row.min_bpm, row.max_bpm, row.count
        );
    }

    for alert in alerts {
        println!(
            "  alert [{:?}] {} (severity {:.2})",
            alert.kind, alert.message, alert.severity
        );
    }

    Ok(())
}

fn load_heart_rate_log(path: &Path) -> Result<Vec<ReplayEvent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading heart-rate log {}", path.display()))?;
    parse_rows(&text, 2, |fields, line_no| {
        Ok(ReplayEvent::HeartRate {
            ts: parse_field(fields[0], "timestamp", line_no)?,
            bpm: parse_field(fields[1], "bpm", line_no)?,
        })
    })
    .with_context(|| format!("parsing {}", path.display()))
}

fn load_motion_log(path: &Path) -> Result<Vec<ReplayEvent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading motion log {}", path.display()))?;
    parse_rows(&text, 4, |fields, line_no| {
        Ok(ReplayEvent::Acceleration {
            ts: parse_field(fields[0], "timestamp", line_no)?,
            x: parse_field(fields[1], "x", line_no)?,
            y: parse_field(fields[2], "y", line_no)?,
            z: parse_field(fields[3], "z", line_no)?,
        })
    })
    .with_context(|| format!("parsing {}", path.display()))
}

/// Parse non-empty CSV rows of exactly `arity` fields, skipping an
/// optional non-numeric header line.
fn parse_rows<F>(text: &str, arity: usize, mut build: F) -> Result<Vec<ReplayEvent>>
where
    F: FnMut(&[&str], usize) -> Result<ReplayEvent>,
{
    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if line_no == 1 && fields[0].parse::<f64>().is_err() {
            continue; // header row
        }
        if fields.len() != arity {
            bail!(
                "line {line_no}: expected {arity} fields, found {}",
                fields.len()
            );
        }
        events.push(build(&fields, line_no)?);
    }
    Ok(events)
}

fn parse_field(field: &str, name: &str, line_no: usize) -> Result<f64> {
    field
        .parse::<f64>()
        .with_context(|| format!("line {line_no}: invalid {name} value {field:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_heart_rate_rows() {
        let events = parse_rows("0.0,72\n1.0,74.5\n", 2, |fields, line_no| {
            Ok(ReplayEvent::HeartRate {
                ts: parse_field(fields[0], "timestamp", line_no)?,
                bpm: parse_field(fields[1], "bpm", line_no)?,
            })
        })
        .unwrap();
        assert_eq!(events.len(), 2);
        assert!((events[1].timestamp() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn skips_header_and_blank_lines() {
        let events = parse_rows("time,bpm\n\n0.0,72\n", 2, |fields, line_no| {
            Ok(ReplayEvent::HeartRate {
                ts: parse_field(fields[0], "timestamp", line_no)?,
                bpm: parse_field(fields[1], "bpm", line_no)?,
            })
        })
        .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn wrong_arity_fails_with_line_number() {
        let err = parse_rows("0.0,1,2\n", 2, |_, _| unreachable!())
            .unwrap_err()
            .to_string();
        assert!(err.contains("line 1"), "{err}");
    }

    #[test]
    fn bad_number_fails_with_field_name() {
        let err = parse_rows("0.0,abc\n", 2, |fields, line_no| {
            Ok(ReplayEvent::HeartRate {
                ts: parse_field(fields[0], "timestamp", line_no)?,
                bpm: parse_field(fields[1], "bpm", line_no)?,
            })
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("bpm"));
    }
}
