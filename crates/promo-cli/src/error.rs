//! # CLI Error Types
//!
//! Failures while loading input files. Anything the engine itself does
//! cannot fail once an order has loaded.

use std::path::PathBuf;

use promo_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for `RuleSettings`.
    #[error("Invalid settings file: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Settings parsed but hold out-of-range values.
    #[error("Invalid rule settings: {0}")]
    InvalidSettings(#[from] ValidationError),

    /// The order file is not valid JSON for `Order`.
    #[error("Invalid order file: {0}")]
    OrderParse(#[from] serde_json::Error),

    /// The order failed catalog validation.
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_path() {
        let err = CliError::Read {
            path: PathBuf::from("/tmp/order.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read /tmp/order.json: missing");
    }
}
