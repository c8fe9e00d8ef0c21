//! Assertions for scenario validation.
//!
//! Each check returns an [`AssertionResult`]; [`AssertionResult::into_result`]
//! turns a failure into [`ShopError::AssertionFailed`] so scenarios can use
//! `?` and the reporter can tell a failed check from an error.

use crate::result::{ShopError, ShopResult};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::time::Duration;

/// Result of an assertion
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Prefix the failure message with what was being checked
    #[must_use]
    pub fn context(mut self, what: &str) -> Self {
        if !self.passed {
            self.message = format!("{what}: {}", self.message);
        }
        self
    }

    /// `Ok(())` on pass, [`ShopError::AssertionFailed`] on failure
    pub fn into_result(self) -> ShopResult<()> {
        if self.passed {
            Ok(())
        } else {
            tracing::error!(message = %self.message, "assertion failed");
            Err(ShopError::assertion(self.message))
        }
    }
}

/// Assertion helpers
#[derive(Debug)]
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Debug + ?Sized>(expected: &T, actual: &T) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }

    /// Assert two lists hold the same items, ignoring order
    #[must_use]
    pub fn same_items<S: AsRef<str> + Debug, T: AsRef<str> + Debug>(
        expected: &[S],
        actual: &[T],
    ) -> AssertionResult {
        let want: BTreeSet<&str> = expected.iter().map(AsRef::as_ref).collect();
        let got: BTreeSet<&str> = actual.iter().map(AsRef::as_ref).collect();
        if want == got {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected items {expected:?}, got {actual:?}"))
        }
    }

    /// Assert an operation finished within a limit
    #[must_use]
    pub fn within(elapsed: Duration, limit: Duration) -> AssertionResult {
        if elapsed <= limit {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!(
                "took {:.2}s, limit is {:.2}s",
                elapsed.as_secs_f64(),
                limit.as_secs_f64()
            ))
        }
    }
}

/// Fail the scenario unless `expected == actual`
pub fn ensure_eq<T: PartialEq + Debug + ?Sized>(what: &str, expected: &T, actual: &T) -> ShopResult<()> {
    Assertion::equals(expected, actual).context(what).into_result()
}

/// Fail the scenario unless `condition` holds
pub fn ensure(condition: bool, message: &str) -> ShopResult<()> {
    Assertion::is_true(condition, message).into_result()
}
