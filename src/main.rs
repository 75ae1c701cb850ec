//! PatchQC CLI - Recording Quality Control
//!
//! Command-line interface for the PatchQC quality-control gates.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;

use patchqc::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("PatchQC v{}", env!("CARGO_PKG_VERSION"));

    let thresholds = commands::load_thresholds(cli.thresholds.as_deref())?;

    match cli.command {
        Commands::Recording { path } => {
            let failures = commands::check_recording(&path, &thresholds)?;
            if !failures.is_empty() {
                std::process::exit(1);
            }
        }
        Commands::PulseResponse { path } => {
            commands::check_pulse_response(&path, &thresholds)?;
        }
        Commands::Scan { dir } => {
            commands::scan(&dir, &thresholds)?;
        }
    }

    Ok(())
}
