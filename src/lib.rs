//! PatchQC - Quality Control for Patch-Clamp Recordings
//!
//! Filters out recordings and pulse responses that are unusable because of
//! instrumentation artifacts, interrupted sweeps or out-of-range baseline
//! conditions. It does not judge cell health or synaptic quality.
//!
//! # Architecture
//!
//! - `recording`: read-only value types (recording, trace, window, spike count)
//! - `stats`: median, standard deviation and friends over sample slices
//! - `qc`: the recording-level and pulse-response gates plus their thresholds
//! - `cli`: JSON-driven command-line front end
//!
//! All quantities are in SI base units: amperes, volts, seconds.

pub mod cli;
pub mod error;
pub mod qc;
pub mod recording;
pub mod stats;

pub use error::{QcError, Result};
pub use qc::{
    pulse_response_qc_pass, recording_qc_pass, PulseResponseVerdict, QcThresholds,
};
pub use recording::{ClampMode, Recording, SpikeCount, Trace, Window};
