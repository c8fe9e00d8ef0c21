//! Order confirmation screen.

use super::common::PageContext;
use super::inventory::InventoryPage;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::page_object::PageObject;
use crate::result::ShopResult;

/// Header shown after a successful order
pub const SUCCESS_HEADER: &str = "Thank you for your order!";

pub(crate) fn complete_header() -> Locator {
    Locator::css(".complete-header")
}

pub(crate) fn back_home_button() -> Locator {
    Locator::id("back-to-products")
}

/// Checkout complete page (`/checkout-complete.html`)
#[derive(Debug)]
pub struct CheckoutCompletePage<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
}

impl<D: BrowserDriver> PageObject for CheckoutCompletePage<'_, D> {
    fn url_pattern(&self) -> &str {
        "/checkout-complete.html"
    }

    fn page_name(&self) -> &str {
        "CheckoutCompletePage"
    }
}

impl<'a, D: BrowserDriver> CheckoutCompletePage<'a, D> {
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self { ctx }
    }

    pub async fn wait_until_loaded(&self) -> ShopResult<()> {
        self.ctx.wait_for_page(self).await
    }

    /// Confirmation header text
    pub async fn success_message(&self) -> ShopResult<String> {
        self.ctx.text(&complete_header()).await
    }

    /// Whether the header reads [`SUCCESS_HEADER`]
    pub async fn is_order_successful(&self) -> ShopResult<bool> {
        Ok(self.success_message().await? == SUCCESS_HEADER)
    }

    /// Back to the listing
    pub async fn back_home(mut self) -> ShopResult<InventoryPage<'a, D>> {
        self.ctx.click(&back_home_button()).await?;
        let inventory = InventoryPage::new(self.ctx);
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }
}
