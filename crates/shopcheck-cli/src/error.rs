//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// At least one scenario failed or errored
    #[error("{failed} of {total} scenarios did not pass")]
    SuiteFailed {
        /// Failed plus errored scenarios
        failed: usize,
        /// Scenarios recorded
        total: usize,
    },

    /// An offline verification did not hold
    #[error("Verification failed: {message}")]
    Verification {
        /// Error message
        message: String,
    },

    /// Logging could not be installed
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML config error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// shopcheck library error
    #[error(transparent)]
    Shop(#[from] shopcheck::ShopError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a verification error
    #[must_use]
    pub fn verification(message: impl Into<String>) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad browser");
        assert!(err.to_string().contains("bad browser"));
    }

    #[test]
    fn test_suite_failed_message() {
        let err = CliError::SuiteFailed { failed: 2, total: 13 };
        assert_eq!(err.to_string(), "2 of 13 scenarios did not pass");
    }

    #[test]
    fn test_shop_error_is_transparent() {
        let err: CliError = shopcheck::ShopError::UnsupportedSortMode {
            mode: "Unknown Option".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unsupported sort mode: 'Unknown Option'");
    }

    #[test]
    fn test_io_error_from() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, CliError::Io(_)));
    }
}
