//! Single product screen.

use super::common::PageContext;
use super::inventory::InventoryPage;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::money::Money;
use crate::page_object::PageObject;
use crate::result::ShopResult;

pub(crate) fn name() -> Locator {
    Locator::css(".inventory_details_name")
}

pub(crate) fn price() -> Locator {
    Locator::css(".inventory_details_price")
}

pub(crate) fn description() -> Locator {
    Locator::css(".inventory_details_desc")
}

pub(crate) fn image() -> Locator {
    Locator::css(".inventory_details_img")
}

pub(crate) fn add_button() -> Locator {
    Locator::id("add-to-cart")
}

pub(crate) fn remove_button() -> Locator {
    Locator::id("remove")
}

pub(crate) fn back_button() -> Locator {
    Locator::id("back-to-products")
}

/// Product details page (`/inventory-item.html`)
#[derive(Debug)]
pub struct ProductDetailsPage<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
}

impl<D: BrowserDriver> PageObject for ProductDetailsPage<'_, D> {
    fn url_pattern(&self) -> &str {
        "/inventory-item.html"
    }

    fn page_name(&self) -> &str {
        "ProductDetailsPage"
    }
}

impl<'a, D: BrowserDriver> ProductDetailsPage<'a, D> {
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self { ctx }
    }

    pub async fn wait_until_loaded(&self) -> ShopResult<()> {
        self.ctx.wait_for_page(self).await
    }

    pub async fn name(&self) -> ShopResult<String> {
        self.ctx.text(&name()).await
    }

    /// Price text as shown (`"$29.99"`)
    pub async fn price_text(&self) -> ShopResult<String> {
        self.ctx.text(&price()).await
    }

    pub async fn price(&self) -> ShopResult<Money> {
        Money::parse(&self.price_text().await?)
    }

    pub async fn description(&self) -> ShopResult<String> {
        self.ctx.text(&description()).await
    }

    pub async fn is_image_displayed(&self) -> ShopResult<bool> {
        self.ctx.is_displayed(&image()).await
    }

    /// Image source
    pub async fn image_src(&self) -> ShopResult<Option<String>> {
        self.ctx.driver().attribute(&image(), "src").await
    }

    pub async fn add_to_cart(&mut self) -> ShopResult<()> {
        self.ctx.click(&add_button()).await
    }

    pub async fn remove(&mut self) -> ShopResult<()> {
        self.ctx.click(&remove_button()).await
    }

    pub async fn cart_badge_count(&self) -> ShopResult<usize> {
        self.ctx.cart_badge_count().await
    }

    /// Return to the listing
    pub async fn back_to_products(mut self) -> ShopResult<InventoryPage<'a, D>> {
        self.ctx.click(&back_button()).await?;
        let inventory = InventoryPage::new(self.ctx);
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }
}
