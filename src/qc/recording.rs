//! Recording-level QC
//!
//! Removes only the most egregious data: dead cells, interrupted sweeps,
//! runaway holding current. It does not judge cell health or access
//! resistance.

use super::thresholds::QcThresholds;
use crate::recording::{ClampMode, Recording};
use log::debug;
use serde::Serialize;
use std::fmt;

/// One failed recording-level check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum RecordingQcFailure {
    /// Baseline current not strictly inside `(-limit, +limit)`
    BaselineCurrent { value: f64, limit: f64 },
    /// Current-clamp baseline potential not strictly inside its range
    BaselinePotential { value: f64, min: f64, max: f64 },
    /// Baseline RMS noise above the mode's limit
    BaselineNoise { value: f64, limit: f64 },
    /// Too many exact-zero samples in the primary trace
    ZeroSamples { zeros: usize, limit: usize },
}

impl fmt::Display for RecordingQcFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingQcFailure::BaselineCurrent { value, limit } => write!(
                f,
                "baseline current {:.1} pA outside ±{:.1} pA",
                value * 1e12,
                limit * 1e12
            ),
            RecordingQcFailure::BaselinePotential { value, min, max } => write!(
                f,
                "baseline potential {:.2} mV outside ({:.1}, {:.1}) mV",
                value * 1e3,
                min * 1e3,
                max * 1e3
            ),
            RecordingQcFailure::BaselineNoise { value, limit } => {
                write!(f, "baseline RMS noise {:e} above {:e}", value, limit)
            }
            RecordingQcFailure::ZeroSamples { zeros, limit } => {
                write!(f, "{} zero samples (limit {})", zeros, limit)
            }
        }
    }
}

/// Check a recording against the default thresholds
pub fn recording_qc_pass(rec: &Recording) -> bool {
    recording_qc_pass_with(rec, &QcThresholds::DEFAULT)
}

/// Check a recording against custom thresholds
///
/// True exactly when `recording_qc_failures` finds nothing.
pub fn recording_qc_pass_with(rec: &Recording, thresholds: &QcThresholds) -> bool {
    recording_qc_failures(rec, thresholds).is_empty()
}

/// List every recording-level check that fails
///
/// Clamp modes other than current clamp and voltage clamp skip the
/// potential and noise checks entirely.
pub fn recording_qc_failures(rec: &Recording, thresholds: &QcThresholds) -> Vec<RecordingQcFailure> {
    let mut failures = Vec::new();

    let limit = thresholds.max_baseline_current;
    if !(-limit < rec.baseline_current && rec.baseline_current < limit) {
        failures.push(RecordingQcFailure::BaselineCurrent {
            value: rec.baseline_current,
            limit,
        });
    }

    match rec.clamp_mode {
        ClampMode::CurrentClamp => {
            let range = thresholds.ic_baseline_potential;
            if !range.contains_strict(rec.baseline_potential) {
                failures.push(RecordingQcFailure::BaselinePotential {
                    value: rec.baseline_potential,
                    min: range.min,
                    max: range.max,
                });
            }
            if rec.baseline_rms_noise > thresholds.ic_max_baseline_noise {
                failures.push(RecordingQcFailure::BaselineNoise {
                    value: rec.baseline_rms_noise,
                    limit: thresholds.ic_max_baseline_noise,
                });
            }
        }
        ClampMode::VoltageClamp => {
            if rec.baseline_rms_noise > thresholds.vc_max_baseline_noise {
                failures.push(RecordingQcFailure::BaselineNoise {
                    value: rec.baseline_rms_noise,
                    limit: thresholds.vc_max_baseline_noise,
                });
            }
        }
        ClampMode::Other(_) => {}
    }

    let zeros = rec.primary().zero_count();
    let zero_limit = rec.primary().len() / thresholds.zero_sample_divisor.max(1);
    if zeros > zero_limit {
        failures.push(RecordingQcFailure::ZeroSamples {
            zeros,
            limit: zero_limit,
        });
    }

    for failure in &failures {
        debug!("[RECORDING-QC] {} recording failed: {}", rec.clamp_mode, failure);
    }
    failures
}
