//! Error types for log parsing.
//!
//! Per-device parse failures are always isolated: nothing in this module
//! aborts a batch. Segmentation misses are recorded as missing data points;
//! an unsupported format selects the fallback parser. Malformed rows inside
//! a recognized layout are skipped by the parsers directly, they carry no
//! error of their own.

use thiserror::Error;

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a device log.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The command's echo could not be located in the log.
    #[error("command echo not found in log: '{command}'")]
    Segmentation {
        /// The command whose output was requested.
        command: String,
    },

    /// No known vendor layout markers were found in the block.
    #[error("no recognized layout in output of '{command}'")]
    UnsupportedFormat {
        /// The command whose output was examined.
        command: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::Segmentation {
            command: "display interface brief".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "command echo not found in log: 'display interface brief'"
        );

        let err = ParseError::UnsupportedFormat {
            command: "display interface brief".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no recognized layout in output of 'display interface brief'"
        );
    }
}
