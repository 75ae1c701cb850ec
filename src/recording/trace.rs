//! Named sample channel of a recording

use super::Window;
use crate::error::{QcError, Result};
use crate::stats;
use serde::{Deserialize, Serialize};

/// A named, sampled waveform (the recorded signal or the command stimulus)
///
/// Samples are in SI units: volts for potentials, amperes for currents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Channel name ("primary", "command", ...)
    pub name: String,
    /// Sample data
    pub data: Vec<f64>,
    /// Sample rate in Hz, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
}

impl Trace {
    /// Create a trace without a known sample rate
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data,
            sample_rate: None,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the trace holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All samples
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Samples covered by `window`
    pub fn slice(&self, window: Window) -> Result<&[f64]> {
        self.data
            .get(window.start()..window.stop())
            .ok_or(QcError::WindowOutOfBounds {
                start: window.start(),
                stop: window.stop(),
                len: self.data.len(),
            })
    }

    /// Number of samples exactly equal to zero
    pub fn zero_count(&self) -> usize {
        stats::zero_count(&self.data)
    }
}
