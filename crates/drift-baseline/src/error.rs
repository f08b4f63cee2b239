//! Error types for baseline storage and comparison.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for baseline operations.
pub type Result<T> = std::result::Result<T, BaselineError>;

/// Errors that can occur in the baseline store.
///
/// `Missing` is not a failure: it signals "establish a baseline now" to the
/// caller. `Corrupt` is fatal for that device's comparison only.
/// Index/store disagreements are not errors at all; the consistency checker
/// reports them as [`crate::BaselineHealth`] verdicts and warnings.
#[derive(Debug, Error)]
pub enum BaselineError {
    /// No baseline has been recorded for this device yet.
    #[error("no baseline recorded for device '{device}'")]
    Missing {
        /// The device without a baseline.
        device: String,
    },

    /// A baseline file exists but cannot be read or decoded.
    #[error("baseline file corrupt: {path}: {reason}")]
    Corrupt {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Why it could not be used.
        reason: String,
    },

    /// Underlying filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Index or snapshot serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
