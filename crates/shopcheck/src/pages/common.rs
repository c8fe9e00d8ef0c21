//! Behaviour shared by every storefront screen.

use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::page_object::{PageObject, UrlMatcher};
use crate::result::{ShopError, ShopResult};
use crate::wait::{wait_for, wait_for_displayed, wait_for_element, WaitOptions};

pub(crate) fn cart_badge() -> Locator {
    Locator::css(".shopping_cart_badge")
}

pub(crate) fn cart_link() -> Locator {
    Locator::css(".shopping_cart_link")
}

pub(crate) fn page_title() -> Locator {
    Locator::css(".title")
}

pub(crate) fn item_names() -> Locator {
    Locator::css(".inventory_item_name")
}

pub(crate) fn item_prices() -> Locator {
    Locator::css(".inventory_item_price")
}

pub(crate) fn remove_buttons() -> Locator {
    Locator::xpath("//button[text() = 'Remove']")
}

/// Borrowed driver plus the explicit wait used by page actions.
///
/// Page objects own one of these; a transition moves it into the next page.
#[derive(Debug)]
pub struct PageContext<'a, D: BrowserDriver> {
    driver: &'a mut D,
    wait: WaitOptions,
}

impl<'a, D: BrowserDriver> PageContext<'a, D> {
    /// Wrap a driver
    pub fn new(driver: &'a mut D, wait: WaitOptions) -> Self {
        Self { driver, wait }
    }

    /// Shorter-lived context over the same driver
    pub fn reborrow(&mut self) -> PageContext<'_, D> {
        PageContext {
            driver: &mut *self.driver,
            wait: self.wait,
        }
    }

    /// The underlying driver
    pub fn driver(&self) -> &D {
        self.driver
    }

    /// The underlying driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        self.driver
    }

    /// Explicit wait options
    pub const fn wait(&self) -> WaitOptions {
        self.wait
    }

    /// Wait for the element to be displayed, then click it
    pub async fn click(&mut self, locator: &Locator) -> ShopResult<()> {
        let _ = wait_for_displayed(&*self.driver, locator, self.wait).await?;
        self.driver.click(locator).await
    }

    /// Replace the contents of an input
    pub async fn fill(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
        let _ = wait_for_element(&*self.driver, locator, self.wait).await?;
        self.driver.clear(locator).await?;
        if !text.is_empty() {
            self.driver.type_text(locator, text).await?;
        }
        Ok(())
    }

    /// Text of the first match
    pub async fn text(&self, locator: &Locator) -> ShopResult<String> {
        self.driver.text(locator).await
    }

    /// Texts of every match
    pub async fn texts(&self, locator: &Locator) -> ShopResult<Vec<String>> {
        self.driver.texts(locator).await
    }

    /// Whether the element is displayed, false when absent
    pub async fn is_displayed(&self, locator: &Locator) -> ShopResult<bool> {
        self.driver.is_displayed(locator).await
    }

    /// Number of items shown on the cart badge; no badge means zero
    pub async fn cart_badge_count(&self) -> ShopResult<usize> {
        let badge = cart_badge();
        if self.driver.count(&badge).await? == 0 {
            return Ok(0);
        }
        let text = self.driver.text(&badge).await?;
        text.trim()
            .parse()
            .map_err(|_| ShopError::parse(text.clone(), "cart badge is not a count"))
    }

    /// Click every match, one at a time, until none is left
    pub async fn click_every(&mut self, locator: &Locator) -> ShopResult<usize> {
        let initial = self.driver.count(locator).await?;
        let mut clicked = 0;
        while clicked < initial && self.driver.count(locator).await? > 0 {
            self.driver.click_nth(locator, 0).await?;
            clicked += 1;
        }
        Ok(clicked)
    }

    /// Choose a dropdown option by its visible text.
    ///
    /// The only dropdown on the storefront is the sort selector, so a
    /// missing option is reported as an unsupported sort mode.
    pub async fn select_from_dropdown(&mut self, locator: &Locator, option: &str) -> ShopResult<()> {
        let _ = wait_for_element(&*self.driver, locator, self.wait).await?;
        match self.driver.select_option_by_text(locator, option).await {
            Err(ShopError::ElementNotFound { .. }) => Err(ShopError::UnsupportedSortMode {
                mode: option.to_string(),
            }),
            other => other,
        }
    }

    /// Wait until the browser shows `page`
    pub async fn wait_for_page<P: PageObject + ?Sized>(&self, page: &P) -> ShopResult<()> {
        let matcher = UrlMatcher::new(page.url_pattern());
        let options = self.wait.with_timeout(page.load_timeout_ms().min(self.wait.timeout_ms));
        let driver = &*self.driver;
        let description = format!("{} to load", page.page_name());
        let matcher = &matcher;
        let _ = wait_for(&description, options, move || async move {
            Ok(matcher.matches(&driver.current_url().await?))
        })
        .await
        .map_err(|e| match e {
            ShopError::Timeout { .. } => ShopError::assertion(format!(
                "expected {} ({}) to load",
                page.page_name(),
                page.url_pattern()
            )),
            other => other,
        })?;
        tracing::debug!(page = page.page_name(), "page loaded");
        Ok(())
    }

    /// Navigate to a path relative to `base_url`
    pub async fn open_path(&mut self, base_url: &str, path: &str) -> ShopResult<()> {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.driver.navigate(&url).await
    }
}
