//! Cart screen.

use super::checkout_info::CheckoutInfoPage;
use super::common::{item_names, item_prices, remove_buttons, PageContext};
use super::inventory::InventoryPage;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::page_object::PageObject;
use crate::result::ShopResult;

pub(crate) fn cart_items() -> Locator {
    Locator::css(".cart_item")
}

pub(crate) fn continue_shopping_button() -> Locator {
    Locator::id("continue-shopping")
}

pub(crate) fn checkout_button() -> Locator {
    Locator::id("checkout")
}

/// Cart page (`/cart.html`)
#[derive(Debug)]
pub struct CartPage<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
}

impl<D: BrowserDriver> PageObject for CartPage<'_, D> {
    fn url_pattern(&self) -> &str {
        "/cart.html"
    }

    fn page_name(&self) -> &str {
        "CartPage"
    }
}

impl<'a, D: BrowserDriver> CartPage<'a, D> {
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self { ctx }
    }

    pub async fn wait_until_loaded(&self) -> ShopResult<()> {
        self.ctx.wait_for_page(self).await
    }

    /// Number of rows in the cart
    pub async fn item_count(&self) -> ShopResult<usize> {
        self.ctx.driver().count(&cart_items()).await
    }

    /// Names of the products in the cart
    pub async fn product_names(&self) -> ShopResult<Vec<String>> {
        self.ctx.texts(&item_names()).await
    }

    /// Price texts of the products in the cart
    pub async fn product_prices(&self) -> ShopResult<Vec<String>> {
        self.ctx.texts(&item_prices()).await
    }

    pub async fn cart_badge_count(&self) -> ShopResult<usize> {
        self.ctx.cart_badge_count().await
    }

    /// Remove every product, returning how many were removed
    pub async fn remove_all_products(&mut self) -> ShopResult<usize> {
        self.ctx.click_every(&remove_buttons()).await
    }

    /// Back to the listing
    pub async fn continue_shopping(mut self) -> ShopResult<InventoryPage<'a, D>> {
        self.ctx.click(&continue_shopping_button()).await?;
        let inventory = InventoryPage::new(self.ctx);
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }

    /// Start checkout
    pub async fn checkout(mut self) -> ShopResult<CheckoutInfoPage<'a, D>> {
        self.ctx.click(&checkout_button()).await?;
        let info = CheckoutInfoPage::new(self.ctx);
        info.wait_until_loaded().await?;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockScreen};
    use crate::wait::WaitOptions;

    fn cart_with(names: &[&str]) -> MockScreen {
        let mut screen = MockScreen::new("https://www.saucedemo.com/cart.html")
            .with_text(&continue_shopping_button(), "Continue Shopping")
            .with_text(&checkout_button(), "Checkout")
            .with_texts(&item_names(), names.iter().copied());
        for _ in names {
            screen = screen
                .with_text(&cart_items(), "")
                .with_text(&remove_buttons(), "Remove");
        }
        screen
    }

    #[tokio::test]
    async fn test_contents_and_remove_all() {
        let mut driver = MockDriver::new()
            .with_screen(cart_with(&["Sauce Labs Backpack", "Sauce Labs Onesie"]))
            .on_click(&remove_buttons(), cart_with(&[]));
        let mut page = CartPage::new(PageContext::new(&mut driver, WaitOptions::new().with_timeout(20)));

        page.wait_until_loaded().await.unwrap();
        assert_eq!(page.item_count().await.unwrap(), 2);
        assert_eq!(
            page.product_names().await.unwrap(),
            vec!["Sauce Labs Backpack", "Sauce Labs Onesie"]
        );
        assert_eq!(page.remove_all_products().await.unwrap(), 1);
        assert_eq!(page.item_count().await.unwrap(), 0);
        assert!(page.product_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_transition() {
        let info = MockScreen::new("https://www.saucedemo.com/checkout-step-one.html");
        let mut driver = MockDriver::new()
            .with_screen(cart_with(&["Sauce Labs Onesie"]))
            .on_click(&checkout_button(), info);
        let page = CartPage::new(PageContext::new(&mut driver, WaitOptions::new().with_timeout(20)));
        assert!(page.checkout().await.is_ok());
    }
}
