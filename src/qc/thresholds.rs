//! QC threshold configuration
//!
//! Every limit is stored in SI base units (amperes, volts, seconds) even
//! though the defaults are easier to read in pA, mV and ms.

use crate::error::{QcError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Constants
// ============================================================================

/// Largest accepted baseline current magnitude (800 pA)
pub const MAX_BASELINE_CURRENT: f64 = 800e-12;

/// Current-clamp baseline potential range (-85 mV, -45 mV)
pub const IC_BASELINE_POTENTIAL_RANGE: (f64, f64) = (-85e-3, -45e-3);

/// Current-clamp baseline RMS noise limit (5 mV)
pub const IC_MAX_BASELINE_NOISE: f64 = 5e-3;

/// Voltage-clamp baseline RMS noise limit (200 pA)
pub const VC_MAX_BASELINE_NOISE: f64 = 200e-12;

/// A sweep fails when more than `len / ZERO_SAMPLE_DIVISOR` samples are exactly 0
pub const ZERO_SAMPLE_DIVISOR: usize = 10;

/// Current-clamp response window standard deviation limit (1.5 mV)
pub const IC_MAX_WINDOW_STD: f64 = 1.5e-3;

/// Current-clamp response window absolute ceiling (-40 mV)
pub const IC_MAX_WINDOW_POTENTIAL: f64 = -40e-3;

/// Voltage-clamp response window standard deviation limit (15 pA)
pub const VC_MAX_WINDOW_STD: f64 = 15e-12;

/// Minimum gap to any adjacent stimulus pulse (8 ms)
pub const MIN_ADJACENT_PULSE_INTERVAL: f64 = 8e-3;

/// Holding potential range for excitatory responses (-85 mV, -45 mV)
pub const EXCITATORY_POTENTIAL_RANGE: (f64, f64) = (-85e-3, -45e-3);

/// Holding potential range for inhibitory responses (-60 mV, -45 mV)
pub const INHIBITORY_POTENTIAL_RANGE: (f64, f64) = (-60e-3, -45e-3);

// ============================================================================
// Thresholds
// ============================================================================

/// Open interval `(min, max)` in SI units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Construct a range from its bounds
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    const fn from_pair(pair: (f64, f64)) -> Self {
        Self::new(pair.0, pair.1)
    }

    /// True if `value` lies strictly inside the range
    pub fn contains_strict(&self, value: f64) -> bool {
        self.min < value && value < self.max
    }
}

/// Full set of QC limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcThresholds {
    /// Baseline current magnitude limit (A)
    pub max_baseline_current: f64,
    /// Current-clamp baseline potential range (V)
    pub ic_baseline_potential: Range,
    /// Current-clamp baseline RMS noise limit (V)
    pub ic_max_baseline_noise: f64,
    /// Voltage-clamp baseline RMS noise limit (A)
    pub vc_max_baseline_noise: f64,
    /// Zero-sample divisor: fail when `zeros > len / divisor`
    pub zero_sample_divisor: usize,
    /// Current-clamp response window std limit (V)
    pub ic_max_window_std: f64,
    /// Current-clamp response window ceiling (V)
    pub ic_max_window_potential: f64,
    /// Voltage-clamp response window std limit (A)
    pub vc_max_window_std: f64,
    /// Minimum gap to any adjacent pulse (s)
    pub min_adjacent_pulse_interval: f64,
    /// Holding potential range for excitatory QC (V)
    pub excitatory_potential: Range,
    /// Holding potential range for inhibitory QC (V)
    pub inhibitory_potential: Range,
}

impl QcThresholds {
    /// Calibrated defaults
    pub const DEFAULT: QcThresholds = QcThresholds {
        max_baseline_current: MAX_BASELINE_CURRENT,
        ic_baseline_potential: Range::from_pair(IC_BASELINE_POTENTIAL_RANGE),
        ic_max_baseline_noise: IC_MAX_BASELINE_NOISE,
        vc_max_baseline_noise: VC_MAX_BASELINE_NOISE,
        zero_sample_divisor: ZERO_SAMPLE_DIVISOR,
        ic_max_window_std: IC_MAX_WINDOW_STD,
        ic_max_window_potential: IC_MAX_WINDOW_POTENTIAL,
        vc_max_window_std: VC_MAX_WINDOW_STD,
        min_adjacent_pulse_interval: MIN_ADJACENT_PULSE_INTERVAL,
        excitatory_potential: Range::from_pair(EXCITATORY_POTENTIAL_RANGE),
        inhibitory_potential: Range::from_pair(INHIBITORY_POTENTIAL_RANGE),
    };

    /// Parse thresholds from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let thresholds: QcThresholds = serde_json::from_str(json)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Load thresholds from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every limit is usable
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_baseline_current", self.max_baseline_current),
            ("ic_max_baseline_noise", self.ic_max_baseline_noise),
            ("vc_max_baseline_noise", self.vc_max_baseline_noise),
            ("ic_max_window_std", self.ic_max_window_std),
            ("vc_max_window_std", self.vc_max_window_std),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(name, value, "a finite positive value"));
            }
        }

        if !self.ic_max_window_potential.is_finite() {
            return Err(invalid(
                "ic_max_window_potential",
                self.ic_max_window_potential,
                "a finite potential in volts",
            ));
        }
        if !(self.min_adjacent_pulse_interval.is_finite() && self.min_adjacent_pulse_interval >= 0.0)
        {
            return Err(invalid(
                "min_adjacent_pulse_interval",
                self.min_adjacent_pulse_interval,
                "a finite non-negative time in seconds",
            ));
        }
        if self.zero_sample_divisor == 0 {
            return Err(QcError::InvalidThreshold {
                name: "zero_sample_divisor".to_string(),
                value: "0".to_string(),
                expected: "a divisor of at least 1".to_string(),
            });
        }

        let ranges = [
            ("ic_baseline_potential", self.ic_baseline_potential),
            ("excitatory_potential", self.excitatory_potential),
            ("inhibitory_potential", self.inhibitory_potential),
        ];
        for (name, range) in ranges {
            if !(range.min.is_finite() && range.max.is_finite() && range.min < range.max) {
                return Err(QcError::InvalidThreshold {
                    name: name.to_string(),
                    value: format!("({}, {})", range.min, range.max),
                    expected: "finite bounds with min < max".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for QcThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn invalid(name: &str, value: f64, expected: &str) -> QcError {
    QcError::InvalidThreshold {
        name: name.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let t = QcThresholds::default();
        assert!(t.validate().is_ok());
        assert_eq!(t.max_baseline_current, 800e-12);
        assert_eq!(t.zero_sample_divisor, 10);
        assert_eq!(t.inhibitory_potential, Range::new(-60e-3, -45e-3));
    }

    #[test]
    fn test_range_membership() {
        let r = Range::new(-85e-3, -45e-3);
        assert!(!r.contains_strict(-85e-3));
        assert!(r.contains_strict(-84.999e-3));
        assert!(!r.contains_strict(f64::NAN));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = QcThresholds::from_json_str(r#"{"min_adjacent_pulse_interval": 0.01}"#).unwrap();
        assert_eq!(t.min_adjacent_pulse_interval, 0.01);
        assert_eq!(t.ic_max_window_std, IC_MAX_WINDOW_STD);
    }

    #[test]
    fn test_invalid_json_values() {
        let err = QcThresholds::from_json_str(r#"{"zero_sample_divisor": 0}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_THRESHOLD");

        let err = QcThresholds::from_json_str(
            r#"{"inhibitory_potential": {"min": -0.045, "max": -0.060}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("inhibitory_potential"));

        let err = QcThresholds::from_json_str(r#"{"vc_max_window_std": -1.0}"#).unwrap_err();
        assert!(err.to_string().contains("vc_max_window_std"));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_baseline_current": 5e-10}}"#).unwrap();

        let t = QcThresholds::from_json_file(file.path()).unwrap();
        assert_eq!(t.max_baseline_current, 5e-10);
    }
}
