//! shopcheck: page-object end-to-end checks for the Swag Labs storefront.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  scenarios ──► pages::* ──► PageContext ──► BrowserDriver        │
//! │      │            │                          ├─ ChromiumDriver   │
//! │      │            │                          └─ MockDriver       │
//! │      │            └──► verify::{price, sort} (pure, no browser)  │
//! │      └──► reporter (outcomes, JSON report, executor.json)        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The verifiers are usable on their own:
//!
//! ```
//! use shopcheck::{verify_tax, Money, TaxRate};
//!
//! let subtotal = Money::parse("Item total: $39.98").unwrap();
//! let tax = Money::parse("Tax: $3.20").unwrap();
//! assert!(verify_tax(subtotal, tax, TaxRate::standard()));
//! ```

#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod assertion;
#[cfg(feature = "browser")]
mod cdp;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod driver;
mod locator;
mod money;
mod page_object;
mod result;
mod session;
mod verify;
mod wait;

/// Fixed accounts, products and messages of the storefront
pub mod data;
/// Page objects, one per storefront screen
pub mod pages;
/// Outcomes, summaries and report files
pub mod reporter;
/// Registered end-to-end scenarios
pub mod scenarios;

pub use assertion::{ensure, ensure_eq, Assertion, AssertionResult};
#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;
pub use driver::{
    BrowserDriver, BrowserKind, DriverConfig, MockDriver, MockElement, MockScreen, RunEnv,
    Screenshot, DEFAULT_BASE_URL, DEFAULT_REMOTE_URL,
};
pub use locator::{product_slug, Locator, LocatorOptions, Selector, DEFAULT_IMPLICIT_WAIT_MS};
pub use money::{round_cents, Money};
pub use page_object::{assert_on_page, PageObject, UrlMatcher};
pub use reporter::{FailureMode, Outcome, Reporter, ScenarioRecord};
pub use result::{ShopError, ShopResult};
pub use scenarios::{Scenario, ScenarioFn, ScenarioFuture};
pub use session::Session;
pub use verify::{
    verify_products_sorted, verify_sorted, verify_sorted_label, verify_subtotal, verify_tax,
    verify_total, CartSnapshot, LineItem, PriceReport, ProductRow, SortMode, TaxRate,
};
pub use wait::{
    wait_for, wait_for_displayed, wait_for_element, WaitOptions, WaitResult,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};
