//! Quality-control gates
//!
//! Two stateless checks: `recording_qc_pass` for a whole sweep and
//! `pulse_response_qc_pass` for one response window. Pulse-response QC runs
//! recording QC first. All limits live in `QcThresholds`.

mod pulse_response;
mod recording;
mod summary;
pub mod thresholds;

pub use pulse_response::{pulse_response_qc_pass, pulse_response_qc_pass_with, PulseResponseVerdict};
pub use recording::{
    recording_qc_failures, recording_qc_pass, recording_qc_pass_with, RecordingQcFailure,
};
pub use summary::QcTally;
pub use thresholds::{QcThresholds, Range};
