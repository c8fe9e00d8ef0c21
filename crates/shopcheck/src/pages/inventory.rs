//! Product listing shown after login.

use super::cart::CartPage;
use super::common::{cart_link, item_names, item_prices, page_title, remove_buttons, PageContext};
use super::login::LoginPage;
use super::product_details::ProductDetailsPage;
use super::sidebar::SideBar;
use crate::driver::BrowserDriver;
use crate::locator::{product_slug, Locator, Selector};
use crate::page_object::PageObject;
use crate::result::{ShopError, ShopResult};
use crate::verify::{verify_products_sorted, ProductRow, SortMode};

pub(crate) fn sort_dropdown() -> Locator {
    Locator::css(".product_sort_container")
}

pub(crate) fn active_sort_option() -> Locator {
    Locator::css(".active_option")
}

pub(crate) fn add_all_buttons() -> Locator {
    Locator::xpath("//button[text() = 'Add to cart']")
}

pub(crate) fn add_button(product: &str) -> Locator {
    Locator::id(format!("add-to-cart-{}", product_slug(product)))
}

pub(crate) fn remove_button(product: &str) -> Locator {
    Locator::id(format!("remove-{}", product_slug(product)))
}

pub(crate) fn product_link(product: &str) -> Locator {
    Locator::from_selector(Selector::css_with_text(".inventory_item_name", product))
}

/// A field inside the listing card of `product`
pub(crate) fn card_field(product: &str, field: &str) -> Locator {
    Locator::xpath(format!(
        "//div[@class='inventory_item'][.//div[contains(@class, 'inventory_item_name')][text()=\"{product}\"]]//{field}"
    ))
}

/// Inventory page (`/inventory.html`)
#[derive(Debug)]
pub struct InventoryPage<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
}

impl<D: BrowserDriver> PageObject for InventoryPage<'_, D> {
    fn url_pattern(&self) -> &str {
        "/inventory.html"
    }

    fn page_name(&self) -> &str {
        "InventoryPage"
    }
}

impl<'a, D: BrowserDriver> InventoryPage<'a, D> {
    /// Wrap a context showing the inventory
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self { ctx }
    }

    /// Wait until the browser shows the inventory
    pub async fn wait_until_loaded(&self) -> ShopResult<()> {
        self.ctx.wait_for_page(self).await
    }

    /// Heading text ("Products")
    pub async fn title(&self) -> ShopResult<String> {
        self.ctx.text(&page_title()).await
    }

    /// Product names in display order
    pub async fn product_names(&self) -> ShopResult<Vec<String>> {
        self.ctx.texts(&item_names()).await
    }

    /// Price texts in display order
    pub async fn product_prices(&self) -> ShopResult<Vec<String>> {
        self.ctx.texts(&item_prices()).await
    }

    /// Name and price of every listed product
    pub async fn product_rows(&self) -> ShopResult<Vec<ProductRow>> {
        let names = self.product_names().await?;
        let prices = self.product_prices().await?;
        if names.len() != prices.len() {
            return Err(ShopError::driver(format!(
                "listing shows {} names but {} prices",
                names.len(),
                prices.len()
            )));
        }
        Ok(names
            .into_iter()
            .zip(prices)
            .map(|(name, price)| ProductRow::new(name, price))
            .collect())
    }

    /// Description shown on a product's card
    pub async fn product_description(&self, name: &str) -> ShopResult<String> {
        self.ctx
            .text(&card_field(name, "div[@class='inventory_item_desc']"))
            .await
    }

    /// Price text shown on a product's card
    pub async fn product_price(&self, name: &str) -> ShopResult<String> {
        self.ctx
            .text(&card_field(name, "div[@class='inventory_item_price']"))
            .await
    }

    /// Image source on a product's card
    pub async fn product_image_src(&self, name: &str) -> ShopResult<Option<String>> {
        self.ctx
            .driver()
            .attribute(&card_field(name, "img"), "src")
            .await
    }

    /// Add one product by name
    pub async fn add_product(&mut self, name: &str) -> ShopResult<()> {
        tracing::debug!(product = name, "add to cart");
        self.ctx.click(&add_button(name)).await
    }

    /// Add several products by name
    pub async fn add_products<S: AsRef<str>>(&mut self, names: &[S]) -> ShopResult<()> {
        for name in names {
            self.add_product(name.as_ref()).await?;
        }
        Ok(())
    }

    /// Add every listed product, returning how many were added
    pub async fn add_all_products(&mut self) -> ShopResult<usize> {
        self.ctx.click_every(&add_all_buttons()).await
    }

    /// Remove one product by name
    pub async fn remove_product(&mut self, name: &str) -> ShopResult<()> {
        tracing::debug!(product = name, "remove from cart");
        self.ctx.click(&remove_button(name)).await
    }

    /// Remove several products by name
    pub async fn remove_products<S: AsRef<str>>(&mut self, names: &[S]) -> ShopResult<()> {
        for name in names {
            self.remove_product(name.as_ref()).await?;
        }
        Ok(())
    }

    /// Press every Remove button, returning how many were pressed
    pub async fn remove_all_products(&mut self) -> ShopResult<usize> {
        self.ctx.click_every(&remove_buttons()).await
    }

    /// Choose a sort option by its dropdown label
    ///
    /// # Errors
    ///
    /// [`ShopError::UnsupportedSortMode`] for a label outside the four options.
    pub async fn sort_by(&mut self, label: &str) -> ShopResult<SortMode> {
        let mode: SortMode = label.parse()?;
        self.ctx
            .select_from_dropdown(&sort_dropdown(), mode.label())
            .await?;
        tracing::debug!(%mode, "sorted listing");
        Ok(mode)
    }

    /// Label of the active sort option
    pub async fn active_sort(&self) -> ShopResult<String> {
        self.ctx.text(&active_sort_option()).await
    }

    /// Check that the listing currently follows `label`'s order
    pub async fn verify_sorting_is_correct(&self, label: &str) -> ShopResult<bool> {
        let mode: SortMode = label.parse()?;
        let rows = self.product_rows().await?;
        verify_products_sorted(&rows, mode)
    }

    /// Number on the cart badge
    pub async fn cart_badge_count(&self) -> ShopResult<usize> {
        self.ctx.cart_badge_count().await
    }

    /// Whether the product's card offers Remove, i.e. it is in the cart
    pub async fn is_in_cart(&self, name: &str) -> ShopResult<bool> {
        self.ctx.is_displayed(&remove_button(name)).await
    }

    /// Open a product's details by clicking its name
    pub async fn open_product(mut self, name: &str) -> ShopResult<ProductDetailsPage<'a, D>> {
        self.ctx.click(&product_link(name)).await?;
        let details = ProductDetailsPage::new(self.ctx);
        details.wait_until_loaded().await?;
        Ok(details)
    }

    /// Go to the cart
    pub async fn open_cart(mut self) -> ShopResult<CartPage<'a, D>> {
        self.ctx.click(&cart_link()).await?;
        let cart = CartPage::new(self.ctx);
        cart.wait_until_loaded().await?;
        Ok(cart)
    }

    /// Reset app state through the side menu
    pub async fn reset_app_state(&mut self) -> ShopResult<()> {
        SideBar::new(self.ctx.reborrow()).reset_app_state().await
    }

    /// Log out through the side menu
    pub async fn logout(self) -> ShopResult<LoginPage<'a, D>> {
        SideBar::new(self.ctx).logout().await
    }

    /// Reset app state then log out
    pub async fn reset_and_logout(self) -> ShopResult<LoginPage<'a, D>> {
        SideBar::new(self.ctx).reset_app_state_and_logout().await
    }
}
