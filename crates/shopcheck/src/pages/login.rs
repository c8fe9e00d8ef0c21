//! The login screen at the storefront root.

use super::common::PageContext;
use super::inventory::InventoryPage;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::page_object::PageObject;
use crate::result::ShopResult;
use crate::wait::wait_for_displayed;

pub(crate) fn username_field() -> Locator {
    Locator::id("user-name")
}

pub(crate) fn password_field() -> Locator {
    Locator::id("password")
}

pub(crate) fn login_button() -> Locator {
    Locator::id("login-button")
}

pub(crate) fn logo() -> Locator {
    Locator::css(".login_logo")
}

pub(crate) fn credentials() -> Locator {
    Locator::id("login_credentials")
}

pub(crate) fn password_hint() -> Locator {
    Locator::css(".login_password")
}

pub(crate) fn error_message() -> Locator {
    Locator::css("h3")
}

pub(crate) fn error_dismiss() -> Locator {
    Locator::css("h3 button")
}

/// Strip the `<h4>` heading from a hint block
fn after_heading(html: &str) -> &str {
    html.split_once("</h4>").map_or(html, |(_, rest)| rest)
}

/// Login page (`/`)
#[derive(Debug)]
pub struct LoginPage<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
}

impl<D: BrowserDriver> PageObject for LoginPage<'_, D> {
    fn url_pattern(&self) -> &str {
        "/"
    }

    fn page_name(&self) -> &str {
        "LoginPage"
    }
}

impl<'a, D: BrowserDriver> LoginPage<'a, D> {
    /// Wrap a context already showing the login screen
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self { ctx }
    }

    /// Wait until the browser shows the login screen
    pub async fn wait_until_loaded(&self) -> ShopResult<()> {
        self.ctx.wait_for_page(self).await
    }

    /// Document title
    pub async fn title(&self) -> ShopResult<String> {
        self.ctx.driver().title().await
    }

    /// Whether the Swag Labs logo is shown
    pub async fn is_logo_displayed(&self) -> ShopResult<bool> {
        self.ctx.is_displayed(&logo()).await
    }

    /// Whether the login button is shown
    pub async fn is_login_button_displayed(&self) -> ShopResult<bool> {
        self.ctx.is_displayed(&login_button()).await
    }

    /// Usernames listed in the credentials hint
    pub async fn accepted_usernames(&self) -> ShopResult<Vec<String>> {
        let html = self.ctx.driver().inner_html(&credentials()).await?;
        Ok(after_heading(&html)
            .split("<br>")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Password shown in the hint block
    pub async fn password_hint(&self) -> ShopResult<String> {
        let html = self.ctx.driver().inner_html(&password_hint()).await?;
        Ok(after_heading(&html).trim().to_string())
    }

    /// Placeholder of the username field
    pub async fn username_placeholder(&self) -> ShopResult<Option<String>> {
        self.ctx
            .driver()
            .attribute(&username_field(), "placeholder")
            .await
    }

    /// Placeholder of the password field
    pub async fn password_placeholder(&self) -> ShopResult<Option<String>> {
        self.ctx
            .driver()
            .attribute(&password_field(), "placeholder")
            .await
    }

    /// Fill both fields and press login, staying on this page
    pub async fn attempt_login(&mut self, username: &str, password: &str) -> ShopResult<()> {
        tracing::debug!(username, "attempting login");
        self.ctx.fill(&username_field(), username).await?;
        self.ctx.fill(&password_field(), password).await?;
        self.ctx.click(&login_button()).await
    }

    /// Log in and wait for the inventory
    pub async fn login(mut self, username: &str, password: &str) -> ShopResult<InventoryPage<'a, D>> {
        self.attempt_login(username, password).await?;
        let inventory = InventoryPage::new(self.ctx);
        inventory.wait_until_loaded().await?;
        tracing::info!(username, "logged in");
        Ok(inventory)
    }

    /// Empty both fields
    pub async fn clear_fields(&mut self) -> ShopResult<()> {
        self.ctx.fill(&username_field(), "").await?;
        self.ctx.fill(&password_field(), "").await
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

    /// Whether an error banner is shown
    pub async fn has_error(&self) -> ShopResult<bool> {
        self.ctx.is_displayed(&error_message()).await
    }
}
