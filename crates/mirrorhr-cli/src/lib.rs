//! MirrorHR CLI
//!
//! Command-line tools for the MirrorHR monitoring pipeline. The watch app
//! logs its sensor streams as CSV (`timestamp,bpm` heart-rate rows and
//! `timestamp,x,y,z` device-motion rows); `replay` runs those logs back
//! through a full monitoring session off-device.
//!
//! # Usage
//!
//! ```bash
//! # Replay a recorded session
//! mirrorhr replay --heart-rate hr.csv --motion motion.csv
//!
//! # JSON lines for downstream tooling, with a smaller HRV window
//! mirrorhr replay --heart-rate hr.csv --json --hrv-window 10
//!
//! # Version information
//! mirrorhr version
//! ```

use clap::{Parser, Subcommand};

pub mod replay;

/// MirrorHR command line interface
#[derive(Parser, Debug)]
#[command(name = "mirrorhr")]
#[command(author, version, about = "Heart-rate mirroring session tools")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay recorded sensor logs through the monitoring pipeline
    Replay(replay::ReplayArgs),

    /// Display version information
    Version,
}
