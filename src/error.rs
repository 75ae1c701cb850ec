//! Error handling for PatchQC
//!
//! QC failures are ordinary `false` verdicts, never errors. The variants here
//! cover inputs the QC gates cannot evaluate at all.

use thiserror::Error;

/// Result type alias for PatchQC operations
pub type Result<T> = std::result::Result<T, QcError>;

/// Main error type for PatchQC operations
#[derive(Error, Debug)]
pub enum QcError {
    // Evaluation Errors
    #[error("Unsupported clamp mode {mode}")]
    UnsupportedClampMode { mode: String },

    #[error("Recording has no '{name}' channel")]
    MissingChannel { name: String },

    #[error("Channel '{name}' has no sample rate")]
    MissingSampleRate { name: String },

    // Window Errors
    #[error("Invalid window [{start}, {stop}): start must be less than stop")]
    InvalidWindow { start: usize, stop: usize },

    #[error("Window [{start}, {stop}) exceeds trace length {len}")]
    WindowOutOfBounds { start: usize, stop: usize, len: usize },

    // Configuration Errors
    #[error("Invalid threshold {name} = {value}: expected {expected}")]
    InvalidThreshold {
        name: String,
        value: String,
        expected: String,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QcError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            QcError::UnsupportedClampMode { .. } => "UNSUPPORTED_CLAMP_MODE",
            QcError::MissingChannel { .. } => "MISSING_CHANNEL",
            QcError::MissingSampleRate { .. } => "MISSING_SAMPLE_RATE",
            QcError::InvalidWindow { .. } => "INVALID_WINDOW",
            QcError::WindowOutOfBounds { .. } => "WINDOW_OUT_OF_BOUNDS",
            QcError::InvalidThreshold { .. } => "INVALID_THRESHOLD",
            QcError::Io(_) => "IO_ERROR",
            QcError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the caller can skip the offending item and keep going
    ///
    /// Per-item input problems are recoverable in a batch; broken
    /// configuration or I/O is not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QcError::UnsupportedClampMode { .. }
                | QcError::MissingChannel { .. }
                | QcError::MissingSampleRate { .. }
                | QcError::InvalidWindow { .. }
                | QcError::WindowOutOfBounds { .. }
        )
    }
}
