//! Locator abstraction for element selection.
//!
//! A [`Locator`] pairs a [`Selector`] with the wait options used when a page
//! object looks the element up. Selectors render to JavaScript queries for
//! the CDP driver and to a stable `kind=value` key for logs and the mock
//! driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default implicit wait for element lookups (4 seconds)
pub const DEFAULT_IMPLICIT_WAIT_MS: u64 = 4_000;

/// Default polling interval while waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., ".inventory_item_name")
    Css(String),
    /// Element id (e.g., "login-button")
    Id(String),
    /// XPath expression
    XPath(String),
    /// CSS selector filtered to elements whose trimmed text equals `text`
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Exact text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create a CSS selector restricted to an exact text
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// JavaScript expression yielding the first match or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::CssWithText { css, text } => {
                format!("(Array.from(document.querySelectorAll({css:?})).find(el => el.textContent.trim() === {text:?}) || null)")
            }
        }
    }

    /// JavaScript expression yielding an array of every match
    #[must_use]
    pub fn to_query_all(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::Id(id) => {
                format!("Array.from(document.querySelectorAll('[id=' + JSON.stringify({id:?}) + ']'))")
            }
            Self::XPath(s) => {
                format!("(() => {{ const r = document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); return Array.from({{ length: r.snapshotLength }}, (_, i) => r.snapshotItem(i)); }})()")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.trim() === {text:?})")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::Id(id) => write!(f, "id={id}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::CssWithText { css, text } => write!(f, "text={css}>>{text}"),
        }
    }
}

/// Locator options for customizing wait behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Lookup timeout; `None` defers to the driver's implicit wait
    pub timeout: Option<Duration>,
    /// Polling interval while waiting
    pub poll_interval: Duration,
}

impl LocatorOptions {
    /// How long a lookup may wait, given the driver's implicit wait
    #[must_use]
    pub fn timeout_or(&self, implicit_wait: Duration) -> Duration {
        self.timeout.unwrap_or(implicit_wait)
    }
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A locator for finding elements on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Locate by CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(selector))
    }

    /// Locate by element id
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::id(id))
    }

    /// Locate by XPath
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::from_selector(Selector::xpath(expr))
    }

    /// Locate a button by its exact label
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self::from_selector(Selector::css_with_text("button", label))
    }

    /// Override the implicit wait for this locator
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}

/// Turn a product name into the storefront's button id suffix.
///
/// `"Sauce Labs Bolt T-Shirt"` becomes `"sauce-labs-bolt-t-shirt"`.
#[must_use]
pub fn product_slug(name: &str) -> String {
    name.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}
