//! Explicit waits.
//!
//! Page objects wait for an element to exist or become visible before
//! acting on it, polling the driver on the tokio timer.

use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::result::{ShopError, ShopResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default explicit wait (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl From<Duration> for WaitOptions {
    fn from(timeout: Duration) -> Self {
        Self::new().with_timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Result of a wait operation
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

/// Poll `condition` until it yields `true`.
///
/// The condition is always checked at least once, so a zero timeout still
/// succeeds on an already-satisfied condition. Errors from the condition
/// end the wait immediately.
///
/// # Errors
///
/// Returns [`ShopError::Timeout`] when the deadline passes first.
pub async fn wait_for<F, Fut>(
    description: &str,
    options: WaitOptions,
    mut condition: F,
) -> ShopResult<WaitResult>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ShopResult<bool>>,
{
    let start = Instant::now();
    loop {
        if condition().await? {
            return Ok(WaitResult {
                elapsed: start.elapsed(),
                waited_for: description.to_string(),
            });
        }
        if start.elapsed() >= options.timeout() {
            tracing::warn!(waited_for = description, ms = options.timeout_ms, "wait timed out");
            return Err(ShopError::Timeout {
                ms: options.timeout_ms,
                waited_for: description.to_string(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Wait until at least one element matches `locator`
pub async fn wait_for_element<D: BrowserDriver + ?Sized>(
    driver: &D,
    locator: &Locator,
    options: WaitOptions,
) -> ShopResult<WaitResult> {
    let description = format!("{locator} to be present");
    wait_for(&description, options, move || async move {
        Ok(driver.count(locator).await? > 0)
    })
    .await
}

/// Wait until the first match of `locator` is displayed
pub async fn wait_for_displayed<D: BrowserDriver + ?Sized>(
    driver: &D,
    locator: &Locator,
    options: WaitOptions,
) -> ShopResult<WaitResult> {
    let description = format!("{locator} to be displayed");
    wait_for(&description, options, move || driver.is_displayed(locator)).await
}
