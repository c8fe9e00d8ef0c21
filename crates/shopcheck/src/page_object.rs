//! Page Object Model support.
//!
//! Each storefront screen is a type implementing [`PageObject`]; transitions
//! between screens consume one page object and return the next, so a test
//! can only call actions that exist on the screen it is looking at.

use crate::driver::BrowserDriver;
use crate::result::{ShopError, ShopResult};

/// A page or component of the storefront.
///
/// ```ignore
/// impl<D: BrowserDriver> PageObject for CartPage<'_, D> {
///     fn url_pattern(&self) -> &str {
///         "/cart.html"
///     }
///
///     fn page_name(&self) -> &str {
///         "CartPage"
///     }
/// }
/// ```
pub trait PageObject {
    /// Path of this page (e.g., "/cart.html")
    fn url_pattern(&self) -> &str;

    /// How long to wait for the page to appear (in milliseconds)
    fn load_timeout_ms(&self) -> u64 {
        10_000
    }

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Matches a URL against a page's path.
///
/// Only the path of a URL takes part in matching; scheme, host, query and
/// fragment are ignored, as are leading and trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatcher {
    path: String,
}

/// Path component of `url`, without the surrounding slashes
fn path_of(url: &str) -> &str {
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => url,
    };
    path.split(['?', '#']).next().unwrap_or(path).trim_matches('/')
}

impl UrlMatcher {
    /// Matcher for the path `/cart.html`, `/inventory.html`, ...
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: path_of(path).to_string(),
        }
    }

    /// Whether `url` has exactly this path
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        path_of(url) == self.path
    }

    /// The path, without slashes
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Fail unless the browser currently shows `page`.
///
/// # Errors
///
/// Returns [`ShopError::AssertionFailed`] naming the page and the actual URL.
pub async fn assert_on_page<D, P>(driver: &D, page: &P) -> ShopResult<()>
where
    D: BrowserDriver + ?Sized,
    P: PageObject + ?Sized,
{
    let url = driver.current_url().await?;
    if UrlMatcher::new(page.url_pattern()).matches(&url) {
        Ok(())
    } else {
        Err(ShopError::assertion(format!(
            "expected {} ({}) but browser is at {url}",
            page.page_name(),
            page.url_pattern()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod url_matcher_tests {
        use super::*;

        #[test]
        fn test_literal_path() {
            let matcher = UrlMatcher::new("/inventory.html");
            assert!(matcher.matches("/inventory.html"));
            assert!(matcher.matches("https://www.saucedemo.com/inventory.html"));
            assert!(matcher.matches("https://www.saucedemo.com/inventory.html?x=1#top"));
            assert!(!matcher.matches("https://www.saucedemo.com/cart.html"));
        }

        #[test]
        fn test_root_pattern() {
            let matcher = UrlMatcher::new("/");
            assert!(matcher.matches("https://www.saucedemo.com/"));
            assert!(matcher.matches("https://www.saucedemo.com"));
            assert!(!matcher.matches("https://www.saucedemo.com/inventory.html"));
        }

        #[test]
        fn test_details_page_ignores_query() {
            let matcher = UrlMatcher::new("/inventory-item.html");
            assert!(matcher.matches("https://www.saucedemo.com/inventory-item.html?id=4"));
            assert!(!matcher.matches("https://www.saucedemo.com/inventory.html?id=4"));
            assert_eq!(matcher.path(), "inventory-item.html");
        }

        #[test]
        fn test_extra_segments_do_not_match() {
            let matcher = UrlMatcher::new("/cart.html");
            assert!(!matcher.matches("https://www.saucedemo.com/static/cart.html"));
            assert!(!matcher.matches("https://www.saucedemo.com/cart.html/extra"));
        }
    }

    mod assert_on_page_tests {
        use super::*;
        use crate::driver::{MockDriver, MockScreen};

        struct Cart;

        impl PageObject for Cart {
            fn url_pattern(&self) -> &str {
                "/cart.html"
            }

            fn page_name(&self) -> &str {
                "CartPage"
            }
        }

        #[tokio::test]
        async fn test_on_page() {
            let driver =
                MockDriver::new().with_screen(MockScreen::new("https://www.saucedemo.com/cart.html"));
            assert!(assert_on_page(&driver, &Cart).await.is_ok());
        }

        #[tokio::test]
        async fn test_wrong_page_is_assertion() {
            let driver = MockDriver::new()
                .with_screen(MockScreen::new("https://www.saucedemo.com/inventory.html"));
            let err = assert_on_page(&driver, &Cart).await.unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("CartPage"));
        }

        #[test]
        fn test_default_timeout() {
            assert_eq!(Cart.load_timeout_ms(), 10_000);
        }
    }
}
