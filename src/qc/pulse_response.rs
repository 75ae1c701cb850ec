//! Pulse-response QC
//!
//! Decides, per pulse response, whether the postsynaptic window is clean
//! enough to look for an excitatory and/or an inhibitory connection.
//! Checks run in a fixed order and stop at the first hard failure:
//!
//! 1. Postsynaptic recording passes recording QC
//! 2. At least one presynaptic spike (unless not applicable)
//! 3. Response window is quiet (and below -40 mV in current clamp)
//! 4. No other presynaptic pulse within 8 ms on either side
//! 5. Holding potential suits each polarity

use super::recording::recording_qc_pass_with;
use super::thresholds::{QcThresholds, Range};
use crate::error::{QcError, Result};
use crate::recording::{ClampMode, Recording, SpikeCount, Window};
use crate::stats::{self, WindowStats};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Independent pass/fail verdicts for the two response polarities
///
/// Both may pass at once: the inhibitory holding range lies inside the
/// excitatory one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PulseResponseVerdict {
    /// Usable for detecting excitatory connections
    pub excitatory: bool,
    /// Usable for detecting inhibitory connections
    pub inhibitory: bool,
}

impl PulseResponseVerdict {
    /// Both polarities fail
    pub const FAIL: PulseResponseVerdict = PulseResponseVerdict {
        excitatory: false,
        inhibitory: false,
    };

    /// `(excitatory, inhibitory)`
    pub fn as_tuple(&self) -> (bool, bool) {
        (self.excitatory, self.inhibitory)
    }

    /// True if either polarity passes
    pub fn any(&self) -> bool {
        self.excitatory || self.inhibitory
    }
}

/// Check a pulse response against the default thresholds
///
/// # Arguments
/// * `post_rec` - Postsynaptic recording
/// * `window` - Samples of `post_rec` containing the response
/// * `spike_count` - Presynaptic spikes evoked by the pulse
/// * `adjacent_pulses` - Times of neighboring pulses relative to this one (s)
///
/// # Errors
/// `UnsupportedClampMode` when the recording is neither current nor voltage
/// clamp, `MissingChannel` for voltage clamp without a command trace and
/// `WindowOutOfBounds` when the window runs past the trace. None of these
/// are reported if an earlier check already failed.
pub fn pulse_response_qc_pass(
    post_rec: &Recording,
    window: Window,
    spike_count: SpikeCount,
    adjacent_pulses: &[f64],
) -> Result<PulseResponseVerdict> {
    pulse_response_qc_pass_with(
        post_rec,
        window,
        spike_count,
        adjacent_pulses,
        &QcThresholds::DEFAULT,
    )
}

/// Check a pulse response against custom thresholds
pub fn pulse_response_qc_pass_with(
    post_rec: &Recording,
    window: Window,
    spike_count: SpikeCount,
    adjacent_pulses: &[f64],
    thresholds: &QcThresholds,
) -> Result<PulseResponseVerdict> {
    if !recording_qc_pass_with(post_rec, thresholds) {
        return Ok(PulseResponseVerdict::FAIL);
    }

    if spike_count.is_zero() {
        debug!("[PULSE-QC] No presynaptic spike evoked");
        return Ok(PulseResponseVerdict::FAIL);
    }

    let base = match window_baseline(post_rec, window, thresholds)? {
        Some(base) => base,
        None => return Ok(PulseResponseVerdict::FAIL),
    };

    let min_interval = thresholds.min_adjacent_pulse_interval;
    if let Some(t) = adjacent_pulses.iter().find(|t| t.abs() < min_interval) {
        debug!(
            "[PULSE-QC] Adjacent pulse at {:.1} ms within {:.1} ms",
            t * 1e3,
            min_interval * 1e3
        );
        return Ok(PulseResponseVerdict::FAIL);
    }

    // Both the window median and the recording-wide baseline must sit in range
    let holding = post_rec.baseline_potential;
    let in_range = |range: Range| {
        range.contains_strict(base) && range.contains_strict(holding)
    };
    let verdict = PulseResponseVerdict {
        excitatory: in_range(thresholds.excitatory_potential),
        inhibitory: in_range(thresholds.inhibitory_potential),
    };

    debug!(
        "[PULSE-QC] base {:.2} mV, holding {:.2} mV -> ex={} in={}",
        base * 1e3,
        holding * 1e3,
        verdict.excitatory,
        verdict.inhibitory
    );
    Ok(verdict)
}

/// Window noise checks
///
/// Returns the window baseline used for the holding-potential checks, or
/// `None` if the window is too noisy. In voltage clamp the baseline is the
/// median of the command trace over the same window.
fn window_baseline(
    rec: &Recording,
    window: Window,
    thresholds: &QcThresholds,
) -> Result<Option<f64>> {
    match rec.clamp_mode {
        ClampMode::CurrentClamp => {
            let data = rec.primary().slice(window)?;
            let Some(summary) = WindowStats::compute(data) else {
                return Ok(None);
            };
            if summary.std_dev > thresholds.ic_max_window_std {
                debug!(
                    "[PULSE-QC] Window std {:.3} mV above {:.3} mV",
                    summary.std_dev * 1e3,
                    thresholds.ic_max_window_std * 1e3
                );
                return Ok(None);
            }
            if summary.max > thresholds.ic_max_window_potential {
                debug!(
                    "[PULSE-QC] Window max {:.2} mV above {:.2} mV",
                    summary.max * 1e3,
                    thresholds.ic_max_window_potential * 1e3
                );
                return Ok(None);
            }
            Ok(Some(summary.median))
        }
        ClampMode::VoltageClamp => {
            let data = rec.primary().slice(window)?;
            let command = rec.command()?.slice(window)?;
            let (Some(base), Some(std_dev)) = (stats::median(command), stats::std_dev(data)) else {
                return Ok(None);
            };
            if std_dev > thresholds.vc_max_window_std {
                debug!(
                    "[PULSE-QC] Window std {:.2} pA above {:.2} pA",
                    std_dev * 1e12,
                    thresholds.vc_max_window_std * 1e12
                );
                return Ok(None);
            }
            Ok(Some(base))
        }
        ClampMode::Other(ref mode) => {
            warn!("[PULSE-QC] Unsupported clamp mode {}", mode);
            Err(QcError::UnsupportedClampMode { mode: mode.clone() })
        }
    }
}
