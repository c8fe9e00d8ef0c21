//! Result and error types for shopcheck.

use thiserror::Error;

/// Result type for shopcheck operations
pub type ShopResult<T> = Result<T, ShopError>;

/// Errors that can occur while driving or verifying the storefront
#[derive(Debug, Error)]
pub enum ShopError {
    /// A displayed value could not be read as a currency amount
    #[error("Cannot parse '{input}' as a currency amount: {reason}")]
    Parse {
        /// Raw text that failed to parse
        input: String,
        /// Why it failed
        reason: String,
    },

    /// A sort mode outside the four storefront options was requested
    #[error("Unsupported sort mode: '{mode}'")]
    UnsupportedSortMode {
        /// The requested label
        mode: String,
    },

    /// No element matched a locator
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator in display form
        locator: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waited_for: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Any other failure reported by the driver backend
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ShopError {
    /// Create a parse error
    #[must_use]
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether this is a verification/assertion failure rather than an error
    /// in reading the page
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_is_distinct_from_parse() {
        assert!(ShopError::assertion("subtotal mismatch").is_assertion());
        assert!(!ShopError::parse("$abc", "invalid digit").is_assertion());
        assert!(!ShopError::UnsupportedSortMode {
            mode: "Unknown Option".to_string()
        }
        .is_assertion());
    }

    #[test]
    fn test_display_messages() {
        let err = ShopError::parse("Tax: $x", "invalid digit");
        assert_eq!(
            err.to_string(),
            "Cannot parse 'Tax: $x' as a currency amount: invalid digit"
        );

        let err = ShopError::Timeout {
            ms: 10_000,
            waited_for: "id=login-button".to_string(),
        };
        assert!(err.to_string().contains("10000ms"));
    }
}
