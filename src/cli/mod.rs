//! CLI Module
//!
//! Command-line interface for evaluating recordings stored as JSON.

pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{QcError, Result};
use crate::recording::{Recording, SpikeCount, Window};

/// PatchQC - quality control for patch-clamp recordings
#[derive(Parser, Debug)]
#[command(name = "patchqc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file overriding the default QC thresholds
    #[arg(short, long, global = true)]
    pub thresholds: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run recording-level QC on one recording
    #[command(name = "recording")]
    Recording {
        /// Recording JSON document
        path: PathBuf,
    },

    /// Run pulse-response QC on one request
    #[command(name = "pulse-response")]
    PulseResponse {
        /// Pulse-response request JSON document
        path: PathBuf,
    },

    /// Evaluate every JSON document under a directory
    #[command(name = "scan")]
    Scan {
        /// Directory to walk
        dir: PathBuf,
    },
}

/// Response window as written in a request
///
/// Either `[start, stop]` sample indices or `{"start": s, "stop": s}` in
/// seconds from the start of the primary trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindowSpec {
    Samples(Window),
    Seconds { start: f64, stop: f64 },
}

/// One pulse response to evaluate, as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseResponseRequest {
    /// Postsynaptic recording
    pub recording: Recording,
    /// Response window
    pub window: WindowSpec,
    /// Presynaptic spike count; `null` when not applicable
    #[serde(default)]
    pub spike_count: Option<u32>,
    /// Times of neighboring pulses relative to this one, in seconds
    #[serde(default)]
    pub adjacent_pulses: Vec<f64>,
}

impl PulseResponseRequest {
    /// Spike count in QC form
    pub fn spike_count(&self) -> SpikeCount {
        self.spike_count.into()
    }

    /// Response window in samples of the primary trace
    ///
    /// A window in seconds needs the primary trace's sample rate.
    pub fn window(&self) -> Result<Window> {
        match self.window {
            WindowSpec::Samples(window) => Ok(window),
            WindowSpec::Seconds { start, stop } => {
                let primary = self.recording.primary();
                let rate = primary.sample_rate.ok_or_else(|| QcError::MissingSampleRate {
                    name: primary.name.clone(),
                })?;
                Window::from_times(start, stop, rate)
            }
        }
    }
}

/// Any document the scanner understands
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QcDocument {
    PulseResponse(PulseResponseRequest),
    Recording(Recording),
}
