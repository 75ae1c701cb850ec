//! Response windows and presynaptic spike counts

use crate::error::{QcError, Result};
use serde::{Deserialize, Serialize};

/// Half-open sample range `[start, stop)` containing a pulse response
///
/// A window is never empty: `start < stop` is checked on construction.
/// The upper bound is checked against a trace when the window is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[usize; 2]", into = "[usize; 2]")]
pub struct Window {
    start: usize,
    stop: usize,
}

impl Window {
    /// Create a window over sample indices `[start, stop)`
    pub fn new(start: usize, stop: usize) -> Result<Self> {
        if start >= stop {
            return Err(QcError::InvalidWindow { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Create a window from times in seconds relative to the trace start
    ///
    /// Times are rounded to the nearest sample; negative times clamp to 0.
    pub fn from_times(start_secs: f64, stop_secs: f64, sample_rate: f64) -> Result<Self> {
        let to_index = |t: f64| (t * sample_rate).round().max(0.0) as usize;
        Self::new(to_index(start_secs), to_index(stop_secs))
    }

    /// First sample index (inclusive)
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last sample index (exclusive)
    pub fn stop(&self) -> usize {
        self.stop
    }
}

impl TryFrom<[usize; 2]> for Window {
    type Error = QcError;

    fn try_from(bounds: [usize; 2]) -> Result<Self> {
        Window::new(bounds[0], bounds[1])
    }
}

impl From<Window> for [usize; 2] {
    fn from(window: Window) -> Self {
        [window.start, window.stop]
    }
}

/// Number of presynaptic spikes evoked by a pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpikeCount {
    /// Spikes were detected and counted (possibly zero)
    Detected(u32),
    /// Spike expectancy is not checked, e.g. for background data
    #[default]
    NotApplicable,
}

impl SpikeCount {
    /// True when spikes were counted and none were found
    pub fn is_zero(&self) -> bool {
        matches!(self, SpikeCount::Detected(0))
    }
}

impl From<Option<u32>> for SpikeCount {
    fn from(count: Option<u32>) -> Self {
        match count {
            Some(n) => SpikeCount::Detected(n),
            None => SpikeCount::NotApplicable,
        }
    }
}

impl From<u32> for SpikeCount {
    fn from(n: u32) -> Self {
        SpikeCount::Detected(n)
    }
}
