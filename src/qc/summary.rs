//! Aggregate QC statistics for a batch of evaluations

use super::pulse_response::PulseResponseVerdict;
use crate::error::QcError;
use serde::{Deserialize, Serialize};

/// Running pass/fail counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcTally {
    /// Recordings evaluated
    pub recordings: usize,
    /// Recordings passing recording QC
    pub recordings_passed: usize,
    /// Pulse responses evaluated
    pub pulse_responses: usize,
    /// Pulse responses passing excitatory QC
    pub excitatory_passed: usize,
    /// Pulse responses passing inhibitory QC
    pub inhibitory_passed: usize,
    /// Inputs that could not be evaluated, by error code
    pub errors: Vec<String>,
}

impl QcTally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one recording-level verdict
    pub fn record_recording(&mut self, passed: bool) {
        self.recordings += 1;
        if passed {
            self.recordings_passed += 1;
        }
    }

    /// Count one pulse-response verdict
    pub fn record_pulse_response(&mut self, verdict: PulseResponseVerdict) {
        self.pulse_responses += 1;
        if verdict.excitatory {
            self.excitatory_passed += 1;
        }
        if verdict.inhibitory {
            self.inhibitory_passed += 1;
        }
    }

    /// Count an input that could not be evaluated
    pub fn record_error(&mut self, err: &QcError) {
        self.errors.push(err.error_code().to_string());
    }

    /// Fraction of recordings passing, `None` before any were counted
    pub fn recording_pass_rate(&self) -> Option<f64> {
        ratio(self.recordings_passed, self.recordings)
    }

    /// Fraction of pulse responses passing excitatory QC
    pub fn excitatory_pass_rate(&self) -> Option<f64> {
        ratio(self.excitatory_passed, self.pulse_responses)
    }

    /// Fraction of pulse responses passing inhibitory QC
    pub fn inhibitory_pass_rate(&self) -> Option<f64> {
        ratio(self.inhibitory_passed, self.pulse_responses)
    }
}

fn ratio(part: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| part as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_tally_has_no_rates() {
        let tally = QcTally::new();
        assert_eq!(tally.recording_pass_rate(), None);
        assert_eq!(tally.excitatory_pass_rate(), None);
    }

    #[test]
    fn test_counts_and_rates() {
        let mut tally = QcTally::new();
        tally.record_recording(true);
        tally.record_recording(false);
        tally.record_recording(true);
        tally.record_pulse_response(PulseResponseVerdict {
            excitatory: true,
            inhibitory: true,
        });
        tally.record_pulse_response(PulseResponseVerdict::FAIL);
        tally.record_error(&QcError::UnsupportedClampMode {
            mode: "i=0".to_string(),
        });

        assert_relative_eq!(tally.recording_pass_rate().unwrap(), 2.0 / 3.0);
        assert_relative_eq!(tally.excitatory_pass_rate().unwrap(), 0.5);
        assert_relative_eq!(tally.inhibitory_pass_rate().unwrap(), 0.5);
        assert_eq!(tally.errors, vec!["UNSUPPORTED_CLAMP_MODE".to_string()]);
    }
}
