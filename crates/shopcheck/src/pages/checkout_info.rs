//! First checkout step: buyer details.

use super::checkout_overview::CheckoutOverviewPage;
use super::common::PageContext;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::page_object::PageObject;
use crate::result::ShopResult;
use crate::wait::wait_for_displayed;

pub(crate) fn first_name_field() -> Locator {
    Locator::id("first-name")
}

pub(crate) fn last_name_field() -> Locator {
    Locator::id("last-name")
}

pub(crate) fn postal_code_field() -> Locator {
    Locator::id("postal-code")
}

pub(crate) fn continue_button() -> Locator {
    Locator::id("continue")
}

pub(crate) fn error_message() -> Locator {
    Locator::css("h3")
}

pub(crate) fn error_dismiss() -> Locator {
    Locator::css("h3 button")
}

/// Buyer details entered on the first checkout step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub postal_code: String,
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            first_name: "Lara".to_string(),
            last_name: "Croft".to_string(),
            postal_code: "US50203040".to_string(),
        }
    }
}

impl CustomerInfo {
    /// Create customer details
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            postal_code: postal_code.into(),
        }
    }
}

/// Checkout information page (`/checkout-step-one.html`)
#[derive(Debug)]
pub struct CheckoutInfoPage<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
}

impl<D: BrowserDriver> PageObject for CheckoutInfoPage<'_, D> {
    fn url_pattern(&self) -> &str {
        "/checkout-step-one.html"
    }

    fn page_name(&self) -> &str {
        "CheckoutInfoPage"
    }
}

impl<'a, D: BrowserDriver> CheckoutInfoPage<'a, D> {
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self { ctx }
    }

    pub async fn wait_until_loaded(&self) -> ShopResult<()> {
        self.ctx.wait_for_page(self).await
    }

    /// Fill the form and press continue, staying on this page.
    ///
    /// Empty fields are left blank.
    pub async fn fill_and_continue(&mut self, info: &CustomerInfo) -> ShopResult<()> {
        self.ctx.fill(&first_name_field(), &info.first_name).await?;
        self.ctx.fill(&last_name_field(), &info.last_name).await?;
        self.ctx.fill(&postal_code_field(), &info.postal_code).await?;
        self.ctx.click(&continue_button()).await
    }

    /// Submit the details and wait for the overview
    pub async fn submit(mut self, info: &CustomerInfo) -> ShopResult<CheckoutOverviewPage<'a, D>> {
        self.fill_and_continue(info).await?;
        let overview = CheckoutOverviewPage::new(self.ctx);
        overview.wait_until_loaded().await?;
        Ok(overview)
    }

    /// Submit the default customer
    pub async fn submit_default(self) -> ShopResult<CheckoutOverviewPage<'a, D>> {
        self.submit(&CustomerInfo::default()).await
    }

    /// Text of the error banner
    pub async fn error_message(&self) -> ShopResult<String> {
        let driver = self.ctx.driver();
        let _ = wait_for_displayed(driver, &error_message(), self.ctx.wait()).await?;
        driver.text(&error_message()).await
    }

    /// Close the error banner
    pub async fn dismiss_error(&mut self) -> ShopResult<()> {
        self.ctx.click(&error_dismiss()).await
    }
}
