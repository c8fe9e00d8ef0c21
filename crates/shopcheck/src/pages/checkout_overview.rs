//! Second checkout step: order summary with prices.

use super::checkout_complete::CheckoutCompletePage;
use super::common::{item_names, item_prices, PageContext};
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::page_object::PageObject;
use crate::result::{ShopError, ShopResult};
use crate::verify::{verify_subtotal, verify_tax, verify_total, CartSnapshot, PriceReport, TaxRate};

pub(crate) fn subtotal_label() -> Locator {
    Locator::css(".summary_subtotal_label")
}

pub(crate) fn tax_label() -> Locator {
    Locator::css(".summary_tax_label")
}

pub(crate) fn total_label() -> Locator {
    Locator::css(".summary_total_label")
}

pub(crate) fn finish_button() -> Locator {
    Locator::xpath("//button[text() = 'Finish']")
}

/// Checkout overview page (`/checkout-step-two.html`)
#[derive(Debug)]
pub struct CheckoutOverviewPage<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
    tax_rate: TaxRate,
}

impl<D: BrowserDriver> PageObject for CheckoutOverviewPage<'_, D> {
    fn url_pattern(&self) -> &str {
        "/checkout-step-two.html"
    }

    fn page_name(&self) -> &str {
        "CheckoutOverviewPage"
    }
}

impl<'a, D: BrowserDriver> CheckoutOverviewPage<'a, D> {
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self {
            ctx,
            tax_rate: TaxRate::standard(),
        }
    }

    /// Verify tax against a rate other than the storefront's 8%
    #[must_use]
    pub fn with_tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate = rate;
        self
    }

    pub async fn wait_until_loaded(&self) -> ShopResult<()> {
        self.ctx.wait_for_page(self).await
    }

    /// Read every line and the three summary fields
    pub async fn snapshot(&self) -> ShopResult<CartSnapshot> {
        let names = self.ctx.texts(&item_names()).await?;
        let prices = self.ctx.texts(&item_prices()).await?;
        if names.len() != prices.len() {
            return Err(ShopError::driver(format!(
                "overview shows {} names but {} prices",
                names.len(),
                prices.len()
            )));
        }
        let lines: Vec<(String, String)> = names.into_iter().zip(prices).collect();
        let snapshot = CartSnapshot::from_text(
            &lines,
            &self.ctx.text(&subtotal_label()).await?,
            &self.ctx.text(&tax_label()).await?,
            &self.ctx.text(&total_label()).await?,
        )?;
        tracing::debug!(
            items = snapshot.items.len(),
            subtotal = %snapshot.subtotal,
            tax = %snapshot.tax,
            total = %snapshot.total,
            "read order summary"
        );
        Ok(snapshot)
    }

    /// Sum of line prices matches the displayed subtotal
    pub async fn check_sub_total_price(&self) -> ShopResult<bool> {
        let snapshot = self.snapshot().await?;
        Ok(verify_subtotal(&snapshot.items, snapshot.subtotal))
    }

    /// Displayed tax matches the subtotal at the tax rate
    pub async fn check_tax(&self) -> ShopResult<bool> {
        let snapshot = self.snapshot().await?;
        Ok(verify_tax(snapshot.subtotal, snapshot.tax, self.tax_rate))
    }

    /// Displayed total matches subtotal plus tax
    pub async fn check_total_price(&self) -> ShopResult<bool> {
        let snapshot = self.snapshot().await?;
        Ok(verify_total(snapshot.subtotal, snapshot.tax, snapshot.total))
    }

    /// All three checks on one reading of the page
    pub async fn verify_prices(&self) -> ShopResult<PriceReport> {
        Ok(self.snapshot().await?.verify(self.tax_rate))
    }

    pub async fn cart_badge_count(&self) -> ShopResult<usize> {
        self.ctx.cart_badge_count().await
    }

    /// Place the order
    pub async fn finish(mut self) -> ShopResult<CheckoutCompletePage<'a, D>> {
        self.ctx.click(&finish_button()).await?;
        let complete = CheckoutCompletePage::new(self.ctx);
        complete.wait_until_loaded().await?;
        tracing::info!("order placed");
        Ok(complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockScreen};
    use crate::money::Money;
    use crate::wait::WaitOptions;

    fn overview(tax: &str, total: &str) -> MockScreen {
        MockScreen::new("https://www.saucedemo.com/checkout-step-two.html")
            .with_texts(&item_names(), ["Sauce Labs Backpack", "Sauce Labs Bike Light"])
            .with_texts(&item_prices(), ["$29.99", "$9.99"])
            .with_text(&subtotal_label(), "Item total: $39.98")
            .with_text(&tax_label(), format!("Tax: {tax}"))
            .with_text(&total_label(), format!("Total: {total}"))
            .with_text(&finish_button(), "Finish")
    }

    fn wait() -> WaitOptions {
        WaitOptions::new().with_timeout(20)
    }

    #[tokio::test]
    async fn test_correct_summary() {
        let mut driver = MockDriver::new().with_screen(overview("$3.20", "$43.18"));
        let page = CheckoutOverviewPage::new(PageContext::new(&mut driver, wait()));

        let snapshot = page.snapshot().await.unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.subtotal, Money::from_cents(3998));
        assert!(page.check_sub_total_price().await.unwrap());
        assert!(page.check_tax().await.unwrap());
        assert!(page.check_total_price().await.unwrap());
        assert!(page.verify_prices().await.unwrap().all_ok());
    }

    #[tokio::test]
    async fn test_wrong_tax() {
        let mut driver = MockDriver::new().with_screen(overview("$3.21", "$43.19"));
        let page = CheckoutOverviewPage::new(PageContext::new(&mut driver, wait()));
        assert!(page.check_sub_total_price().await.unwrap());
        assert!(!page.check_tax().await.unwrap());
        assert!(page.check_total_price().await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_rate() {
        let mut driver = MockDriver::new().with_screen(overview("$4.00", "$43.98"));
        let page = CheckoutOverviewPage::new(PageContext::new(&mut driver, wait()))
            .with_tax_rate(TaxRate::new(rust_decimal::Decimal::new(1, 1)));
        assert!(page.check_tax().await.unwrap());
    }

    #[tokio::test]
    async fn test_unreadable_tax_is_parse_error() {
        let mut driver = MockDriver::new().with_screen(overview("N/A", "$43.18"));
        let page = CheckoutOverviewPage::new(PageContext::new(&mut driver, wait()));
        assert!(matches!(page.check_tax().await, Err(ShopError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_finish() {
        let done = MockScreen::new("https://www.saucedemo.com/checkout-complete.html");
        let mut driver = MockDriver::new()
            .with_screen(overview("$3.20", "$43.18"))
            .on_click(&finish_button(), done);
        let page = CheckoutOverviewPage::new(PageContext::new(&mut driver, wait()));
        assert!(page.finish().await.is_ok());
    }
}
