//! Custom error types for the crate.
//!
//! `RadioError` is the single error enum for device control and harness
//! plumbing. Device backends surface it through `anyhow::Error` at the
//! capability-trait seam; callers that need to react to a specific failure
//! downcast, everything else formats it via `Display`.

use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type AppResult<T> = std::result::Result<T, RadioError>;

/// Errors raised by device backends and the validation harness.
#[derive(Error, Debug)]
pub enum RadioError {
    #[error("Sample rate {requested} Hz is outside the supported range ({min}-{rec_max} Hz)")]
    RateOutOfRange {
        /// Integer part of the rejected rate, in Hz.
        requested: u64,
        /// Lower bound of the device range.
        min: u32,
        /// Upper bound of the device range.
        rec_max: u32,
    },

    #[error("Invalid rational rate: {0}")]
    InvalidRate(String),

    #[error("Readback mismatch: device applied {actual}, read back {readback}")]
    ReadbackMismatch {
        /// Rate the set call reported as applied.
        actual: String,
        /// Rate the subsequent get returned.
        readback: String,
    },

    #[error("Device command failed: {0}")]
    Command(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
