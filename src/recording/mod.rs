//! Recording data model
//!
//! Read-only value types handed to the QC gates by the analysis pipeline.
//! All quantities are in SI base units: amperes, volts, seconds.

mod clamp;
mod trace;
mod window;

pub use clamp::ClampMode;
pub use trace::Trace;
pub use window::{SpikeCount, Window};

use crate::error::{QcError, Result};
use serde::{Deserialize, Serialize};

/// Channel name of the recorded signal
pub const PRIMARY_CHANNEL: &str = "primary";

/// Channel name of the commanded stimulus
pub const COMMAND_CHANNEL: &str = "command";

/// A single-sweep patch-clamp recording with its baseline metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Clamp mode governing units and thresholds
    pub clamp_mode: ClampMode,
    /// Baseline holding current in amperes
    pub baseline_current: f64,
    /// Baseline membrane potential in volts
    pub baseline_potential: f64,
    /// Baseline RMS noise, volts in current clamp or amperes in voltage clamp
    pub baseline_rms_noise: f64,
    /// Recorded signal
    pub primary: Trace,
    /// Commanded stimulus (voltage clamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Trace>,
}

impl Recording {
    /// Create a recording with baseline metadata and a primary trace
    pub fn new(
        clamp_mode: ClampMode,
        baseline_current: f64,
        baseline_potential: f64,
        baseline_rms_noise: f64,
        primary: Vec<f64>,
    ) -> Self {
        Self {
            clamp_mode,
            baseline_current,
            baseline_potential,
            baseline_rms_noise,
            primary: Trace::new(PRIMARY_CHANNEL, primary),
            command: None,
        }
    }

    /// Attach a command trace
    pub fn with_command(mut self, command: Vec<f64>) -> Self {
        self.command = Some(Trace::new(COMMAND_CHANNEL, command));
        self
    }

    /// Recorded signal
    pub fn primary(&self) -> &Trace {
        &self.primary
    }

    /// Commanded stimulus, or `MissingChannel` if none was recorded
    pub fn command(&self) -> Result<&Trace> {
        self.command.as_ref().ok_or_else(|| QcError::MissingChannel {
            name: COMMAND_CHANNEL.to_string(),
        })
    }

    /// Load a recording from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
