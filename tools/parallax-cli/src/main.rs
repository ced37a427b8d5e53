//! Parallax CLI — developer tooling for the tilt card effect.
//!
//! Usage:
//!   parallax check                 Report which motion sources are available
//!   parallax transform [OPTIONS]   Map one attitude to render parameters
//!   parallax record <PATH>         Write a synthetic motion trace
//!   parallax replay <PATH>         Compose one frame per traced sample
//!   parallax simulate [OPTIONS]    Run the card live against a motion source

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parallax_common::config::{AppConfig, BackendKind};

mod commands;

#[derive(Parser)]
#[command(
    name = "parallax",
    about = "Motion-driven 3D tilt card, from the command line",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which motion sources are available
    Check {
        /// Trace file to probe for the replay source
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Map one attitude/gravity reading to render parameters
    Transform {
        /// Pitch in degrees
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        pitch_deg: f64,

        /// Roll in degrees
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        roll_deg: f64,

        /// Horizontal gravity component [-1.0, 1.0]
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        gravity_x: f64,

        /// Print the full frame composition as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic motion trace
    Record {
        /// Output trace path
        output: PathBuf,

        /// Trace length (seconds)
        #[arg(long, default_value = "10.0")]
        seconds: f64,

        /// Sample rate (Hz)
        #[arg(long)]
        rate_hz: Option<u32>,
    },

    /// Compose one frame per sample of a recorded trace
    Replay {
        /// Trace file to replay
        trace: PathBuf,

        /// Write frames as JSONL to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the card view live against a motion source
    Simulate {
        /// Motion source: synthetic|replay|none
        #[arg(long)]
        backend: Option<BackendKind>,

        /// Trace file for the replay source
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Number of frames to render before exiting
        #[arg(long, default_value = "180")]
        frames: u64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    logging.json |= cli.json_logs;
    parallax_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Check { trace } => commands::check::run(&config, trace),
        Commands::Transform {
            pitch_deg,
            roll_deg,
            gravity_x,
            json,
        } => commands::transform::run(pitch_deg, roll_deg, gravity_x, json),
        Commands::Record {
            output,
            seconds,
            rate_hz,
        } => commands::record::run(
            output,
            seconds,
            rate_hz.unwrap_or(config.motion.update_rate_hz),
        ),
        Commands::Replay { trace, output } => commands::replay::run(trace, output),
        Commands::Simulate {
            backend,
            trace,
            frames,
        } => {
            commands::simulate::run(
                backend.unwrap_or(config.motion.backend),
                trace,
                frames,
                config.motion.update_rate_hz,
            )
            .await
        }
    }
}
