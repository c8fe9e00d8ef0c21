//! End-to-end scenarios against the storefront.
//!
//! A scenario is a plain async function over a [`Session`]. Checks go
//! through [`ensure`]/[`ensure_eq`] so a wrong value surfaces as
//! [`ShopError::AssertionFailed`](crate::ShopError::AssertionFailed) while
//! anything else (a missing element, a timeout, an unreadable price) stays an
//! error.

use crate::assertion::{ensure, ensure_eq, Assertion};
use crate::data::{self, checkout_errors, PASSWORD, STANDARD_USER};
use crate::driver::BrowserDriver;
use crate::pages::{CustomerInfo, SUCCESS_HEADER};
use crate::result::ShopResult;
use crate::session::Session;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

/// Future returned by a scenario, borrowing its session
pub type ScenarioFuture<'s> = Pin<Box<dyn Future<Output = ShopResult<()>> + 's>>;

/// Scenario entry point
pub type ScenarioFn<D> = for<'s> fn(&'s mut Session<D>) -> ScenarioFuture<'s>;

/// A named scenario
pub struct Scenario<D: BrowserDriver> {
    /// Identifier used for filtering and reports
    pub name: &'static str,
    /// One line summary
    pub description: &'static str,
    /// Body
    pub run: ScenarioFn<D>,
}

impl<D: BrowserDriver> Scenario<D> {
    /// Register `run` under `name`
    pub const fn new(name: &'static str, description: &'static str, run: ScenarioFn<D>) -> Self {
        Self {
            name,
            description,
            run,
        }
    }

    /// Run against `session`
    pub async fn run(&self, session: &mut Session<D>) -> ShopResult<()> {
        tracing::info!(scenario = self.name, "scenario started");
        (self.run)(session).await
    }
}

impl<D: BrowserDriver> Clone for Scenario<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: BrowserDriver> Copy for Scenario<D> {}

impl<D: BrowserDriver> fmt::Debug for Scenario<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Every scenario, in run order
#[must_use]
pub fn registry<D: BrowserDriver + 'static>() -> Vec<Scenario<D>> {
    vec![
        Scenario::new("home_page_ui", "login screen title, logo, button and hints", home_page_ui::<D>),
        Scenario::new("login", "every valid user reaches the inventory", login::<D>),
        Scenario::new("login_negative", "refused logins show the right banner", login_negative::<D>),
        Scenario::new("login_response_time", "every valid user logs in quickly", login_response_time::<D>),
        Scenario::new("add_products", "cart badge follows added products", add_products::<D>),
        Scenario::new(
            "add_via_product_page",
            "adding from the details page fills the cart",
            add_via_product_page::<D>,
        ),
        Scenario::new(
            "remove_specific_products",
            "removing from the details page lowers the badge",
            remove_specific_products::<D>,
        ),
        Scenario::new("remove_all_products", "listing and cart can be emptied", remove_all_products::<D>),
        Scenario::new("product_details", "details page matches the listing card", product_details::<D>),
        Scenario::new("sort_by_option", "every sort option orders the listing", sort_by_option::<D>),
        Scenario::new("sort_response_time", "sorting is quick for the slow user", sort_response_time::<D>),
        Scenario::new(
            "submit_details_negative",
            "checkout form names each missing field",
            submit_details_negative::<D>,
        ),
        Scenario::new(
            "prices_in_cart_calculation",
            "subtotal, tax and total add up",
            prices_in_cart_calculation::<D>,
        ),
        Scenario::new("full_purchase", "buy one product end to end", full_purchase::<D>),
    ]
}

/// Scenarios whose name contains `filter`, or all of them
#[must_use]
pub fn select<D: BrowserDriver + 'static>(filter: Option<&str>) -> Vec<Scenario<D>> {
    registry()
        .into_iter()
        .filter(|s| filter.map_or(true, |f| s.name.contains(f)))
        .collect()
}

fn home_page_ui<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = session.open().await?;

        ensure_eq("page title", data::PAGE_TITLE, page.title().await?.as_str())?;
        ensure(page.is_logo_displayed().await?, "logo is not displayed")?;
        ensure(page.is_login_button_displayed().await?, "login button is not displayed")?;

        let mut expected = data::VALID_USERS.to_vec();
        expected.push(data::LOCKED_USER);
        Assertion::same_items(&expected, &page.accepted_usernames().await?)
            .context("accepted usernames")
            .into_result()?;
        ensure_eq("password hint", PASSWORD, page.password_hint().await?.as_str())?;
        ensure_eq(
            "username placeholder",
            &Some(data::USERNAME_PLACEHOLDER),
            &page.username_placeholder().await?.as_deref(),
        )?;
        ensure_eq(
            "password placeholder",
            &Some(data::PASSWORD_PLACEHOLDER),
            &page.password_placeholder().await?.as_deref(),
        )
    })
}

fn login<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        for user in data::VALID_USERS {
            let inventory = session.login_as(user, PASSWORD).await?;
            let heading = inventory.title().await?;
            ensure_eq(&format!("heading after login as {user}"), data::INVENTORY_TITLE, heading.as_str())?;
            inventory.reset_and_logout().await?;
        }
        Ok(())
    })
}

fn login_negative<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut page = session.open().await?;
        for case in data::rejected_logins() {
            page.attempt_login(case.username, case.password).await?;
            let banner = page.error_message().await?;
            ensure_eq(
                &format!("banner for '{}'/'{}'", case.username, case.password),
                case.error,
                banner.as_str(),
            )?;
            page.dismiss_error().await?;
        }
        Ok(())
    })
}

fn login_response_time<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        for user in data::VALID_USERS {
            let page = session.open().await?;
            let started = Instant::now();
            let inventory = page.login(user, PASSWORD).await?;
            let elapsed = started.elapsed();
            tracing::info!(user, elapsed_ms = elapsed.as_millis() as u64, "login timed");
            Assertion::within(elapsed, data::MAX_LOGIN_TIME)
                .context(&format!("login as {user}"))
                .into_result()?;
            inventory.reset_and_logout().await?;
        }
        Ok(())
    })
}

fn add_products<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        for selection in data::PRODUCT_SELECTIONS {
            let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
            inventory.add_products(selection).await?;
            ensure_eq("cart badge", &selection.len(), &inventory.cart_badge_count().await?)?;

            let cart = inventory.open_cart().await?;
            Assertion::same_items(selection, &cart.product_names().await?)
                .context("cart contents")
                .into_result()?;
            session.reset_app_state().await?;
        }
        Ok(())
    })
}

fn add_via_product_page<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        for product in data::CATALOGUE {
            let inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
            let mut details = inventory.open_product(product.name).await?;
            ensure_eq("details name", product.name, details.name().await?.as_str())?;
            details.add_to_cart().await?;
            ensure_eq(
                &format!("cart badge after adding {}", product.name),
                &1,
                &details.cart_badge_count().await?,
            )?;

            let cart = details.back_to_products().await?.open_cart().await?;
            let names = cart.product_names().await?;
            ensure(
                names.iter().any(|n| n == product.name),
                &format!("{} is not in the cart {names:?}", product.name),
            )?;
            let inventory = cart.continue_shopping().await?;
            ensure(
                inventory.is_in_cart(product.name).await?,
                &format!("{} is not marked as added on the listing", product.name),
            )?;
            session.reset_app_state().await?;
        }
        Ok(())
    })
}

fn remove_specific_products<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
        let added = inventory.add_all_products().await?;
        ensure_eq("products added", &data::CATALOGUE.len(), &added)?;
        let mut remaining = inventory.cart_badge_count().await?;
        ensure_eq("cart badge", &data::CATALOGUE.len(), &remaining)?;

        for product in data::CATALOGUE {
            let mut details = inventory.open_product(product.name).await?;
            details.remove().await?;
            remaining = remaining.saturating_sub(1);
            ensure_eq(
                &format!("cart badge after removing {}", product.name),
                &remaining,
                &details.cart_badge_count().await?,
            )?;
            inventory = details.back_to_products().await?;
        }
        session.reset_app_state().await
    })
}

fn remove_all_products<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
        inventory.add_all_products().await?;
        let removed = inventory.remove_all_products().await?;
        ensure_eq("products removed from listing", &data::CATALOGUE.len(), &removed)?;
        ensure_eq("cart badge", &0, &inventory.cart_badge_count().await?)?;

        inventory.add_all_products().await?;
        let mut cart = inventory.open_cart().await?;
        ensure_eq("cart lines", &data::CATALOGUE.len(), &cart.item_count().await?)?;
        cart.remove_all_products().await?;
        ensure_eq("cart lines after removal", &0, &cart.item_count().await?)?;
        ensure_eq("cart badge after removal", &0, &cart.cart_badge_count().await?)?;
        session.reset_app_state().await
    })
}

fn product_details<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
        for product in data::CATALOGUE {
            let price = inventory.product_price(product.name).await?;
            let description = inventory.product_description(product.name).await?;
            let image = inventory.product_image_src(product.name).await?;
            ensure_eq(&format!("listed price of {}", product.name), product.price, price.as_str())?;

            let details = inventory.open_product(product.name).await?;
            ensure_eq("details name", product.name, details.name().await?.as_str())?;
            ensure_eq(
                &format!("details price of {}", product.name),
                price.as_str(),
                details.price_text().await?.as_str(),
            )?;
            ensure_eq(
                &format!("details description of {}", product.name),
                description.as_str(),
                details.description().await?.as_str(),
            )?;
            ensure(
                details.is_image_displayed().await?,
                &format!("no image for {}", product.name),
            )?;
            ensure_eq(
                &format!("details image of {}", product.name),
                &image,
                &details.image_src().await?,
            )?;
            inventory = details.back_to_products().await?;
        }
        session.reset_app_state().await
    })
}

fn sort_by_option<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
        for label in data::sort_labels() {
            let mode = inventory.sort_by(label).await?;
            ensure_eq("active sort option", label, inventory.active_sort().await?.as_str())?;
            ensure(
                inventory.verify_sorting_is_correct(label).await?,
                &format!("listing is not sorted by {mode}"),
            )?;
        }
        session.reset_app_state().await
    })
}

fn sort_response_time<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut inventory = session.login_as(data::SLOW_USER, PASSWORD).await?;
        for label in data::sort_labels() {
            let started = Instant::now();
            let _ = inventory.sort_by(label).await?;
            let elapsed = started.elapsed();
            tracing::info!(label, elapsed_ms = elapsed.as_millis() as u64, "sort timed");
            Assertion::within(elapsed, data::MAX_SORT_TIME)
                .context(&format!("sort by {label}"))
                .into_result()?;
        }
        session.reset_app_state().await
    })
}

/// Customer details with one field left blank, and the banner each one shows
fn incomplete_customers() -> [(CustomerInfo, &'static str); 3] {
    let full = CustomerInfo::default();
    [
        (
            CustomerInfo {
                first_name: String::new(),
                ..full.clone()
            },
            checkout_errors::EMPTY_FIRST_NAME,
        ),
        (
            CustomerInfo {
                last_name: String::new(),
                ..full.clone()
            },
            checkout_errors::EMPTY_LAST_NAME,
        ),
        (
            CustomerInfo {
                postal_code: String::new(),
                ..full
            },
            checkout_errors::EMPTY_POSTAL_CODE,
        ),
    ]
}

fn submit_details_negative<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
        inventory.add_product(data::PURCHASE_PRODUCT).await?;
        let mut info = inventory.open_cart().await?.checkout().await?;
        for (customer, expected) in incomplete_customers() {
            info.fill_and_continue(&customer).await?;
            let banner = info.error_message().await?;
            ensure_eq(&format!("banner for {customer:?}"), expected, banner.as_str())?;
            info.dismiss_error().await?;
        }
        session.reset_app_state().await
    })
}

/// Buy `selection` up to the overview and check its arithmetic
async fn check_cart_prices<D: BrowserDriver>(session: &mut Session<D>, selection: &[&str]) -> ShopResult<()> {
    let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
    inventory.add_products(selection).await?;
    ensure_eq("cart badge", &selection.len(), &inventory.cart_badge_count().await?)?;

    let overview = inventory
        .open_cart()
        .await?
        .checkout()
        .await?
        .submit_default()
        .await?;
    ensure_eq("cart badge on overview", &selection.len(), &overview.cart_badge_count().await?)?;

    let report = overview.verify_prices().await?;
    let listed: Vec<&str> = report.displayed.items.iter().map(|i| i.name.as_str()).collect();
    Assertion::same_items(selection, &listed)
        .context("overview lines")
        .into_result()?;
    tracing::info!(
        items = selection.len(),
        subtotal = %report.displayed.subtotal,
        tax = %report.displayed.tax,
        total = %report.displayed.total,
        "checked order summary"
    );
    report.into_result()?;
    session.reset_app_state().await
}

fn prices_in_cart_calculation<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        for selection in data::PRODUCT_SELECTIONS {
            check_cart_prices(session, selection).await?;
        }
        Ok(())
    })
}

fn full_purchase<D: BrowserDriver + 'static>(session: &mut Session<D>) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let mut inventory = session.login_as(STANDARD_USER, PASSWORD).await?;
        inventory.add_product(data::PURCHASE_PRODUCT).await?;
        ensure_eq("cart badge", &1, &inventory.cart_badge_count().await?)?;

        let cart = inventory.open_cart().await?;
        Assertion::same_items(&[data::PURCHASE_PRODUCT], &cart.product_names().await?)
            .context("cart contents")
            .into_result()?;

        let overview = cart.checkout().await?.submit_default().await?;
        ensure(
            overview.check_total_price().await?,
            "order total is not subtotal plus tax",
        )?;

        let complete = overview.finish().await?;
        ensure_eq("confirmation", SUCCESS_HEADER, complete.success_message().await?.as_str())?;
        complete.back_home().await?;
        session.reset_app_state().await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DriverConfig, MockDriver, MockElement, MockScreen};
    use crate::pages::locators::{self, details};
    use crate::result::ShopError;
    use crate::verify::SortMode;
    use std::time::Duration;

    const BASE: &str = "https://www.saucedemo.com/";

    /// Screens of a scripted storefront
    mod storefront {
        use super::*;

        pub fn login() -> MockScreen {
            login_with_hint(PASSWORD)
        }

        pub fn login_with_hint(password: &str) -> MockScreen {
            let mut usernames = String::from("<h4>Accepted usernames are:</h4>");
            for user in data::VALID_USERS.iter().chain([&data::LOCKED_USER]) {
                usernames.push_str(user);
                usernames.push_str("<br>");
            }
            MockScreen::new(BASE)
                .with(
                    &locators::username_field(),
                    MockElement::default().attr("placeholder", data::USERNAME_PLACEHOLDER),
                )
                .with(
                    &locators::password_field(),
                    MockElement::default().attr("placeholder", data::PASSWORD_PLACEHOLDER),
                )
                .with_text(&locators::login_button(), "Login")
                .with_text(&locators::logo(), "Swag Labs")
                .with(&locators::credentials(), MockElement::text("").html(usernames))
                .with(
                    &locators::password_hint(),
                    MockElement::text("").html(format!("<h4>Password for all users:</h4>{password}")),
                )
        }

        pub fn rejected(banner: &str) -> MockScreen {
            login()
                .with_text(&locators::error_message(), banner)
                .with_text(&locators::error_dismiss(), "")
        }

        /// Burger menu elements, already open
        fn with_menu(screen: MockScreen) -> MockScreen {
            screen
                .with_text(&locators::menu_button(), "Open Menu")
                .with_text(&locators::close_button(), "Close Menu")
                .with_text(&locators::logout_link(), "Logout")
                .with_text(&locators::reset_link(), "Reset App State")
        }

        fn with_badge(screen: MockScreen, badge: usize) -> MockScreen {
            if badge == 0 {
                screen
            } else {
                screen.with_text(&locators::cart_badge(), badge.to_string())
            }
        }

        pub fn inventory(rows: &[(&str, &str)], active: SortMode, badge: usize) -> MockScreen {
            let mut screen = MockScreen::new(format!("{BASE}inventory.html"))
                .with_text(&locators::page_title(), data::INVENTORY_TITLE)
                .with_text(&locators::cart_link(), "")
                .with(
                    &locators::sort_dropdown(),
                    MockElement::default().options(data::sort_labels()),
                )
                .with_text(&locators::active_sort_option(), active.label())
                .with_texts(&locators::item_names(), rows.iter().map(|(n, _)| *n))
                .with_texts(&locators::item_prices(), rows.iter().map(|(_, p)| *p));
            for product in data::CATALOGUE {
                screen = screen
                    .with_text(&locators::add_button(product.name), "Add to cart")
                    .with_text(&locators::product_link(product.name), product.name);
            }
            with_menu(with_badge(screen, badge))
        }

        pub fn catalogue_rows() -> Vec<(&'static str, &'static str)> {
            data::CATALOGUE.iter().map(|p| (p.name, p.price)).collect()
        }

        pub fn cart(rows: &[(&str, &str)]) -> MockScreen {
            let screen = MockScreen::new(format!("{BASE}cart.html"))
                .with_texts(&locators::item_names(), rows.iter().map(|(n, _)| *n))
                .with_texts(&locators::item_prices(), rows.iter().map(|(_, p)| *p))
                .with_texts(&locators::cart_items(), rows.iter().map(|(n, _)| *n))
                .with_text(&locators::checkout_button(), "Checkout");
            with_menu(with_badge(screen, rows.len()))
        }

        pub fn checkout_info() -> MockScreen {
            let screen = MockScreen::new(format!("{BASE}checkout-step-one.html"))
                .with(&locators::first_name_field(), MockElement::default())
                .with(&locators::last_name_field(), MockElement::default())
                .with(&locators::postal_code_field(), MockElement::default())
                .with_text(&locators::continue_button(), "Continue");
            with_menu(screen)
        }

        pub fn overview(rows: &[(&str, &str)], subtotal: &str, tax: &str, total: &str) -> MockScreen {
            let screen = MockScreen::new(format!("{BASE}checkout-step-two.html"))
                .with_texts(&locators::item_names(), rows.iter().map(|(n, _)| *n))
                .with_texts(&locators::item_prices(), rows.iter().map(|(_, p)| *p))
                .with_text(&locators::subtotal_label(), format!("Item total: {subtotal}"))
                .with_text(&locators::tax_label(), format!("Tax: {tax}"))
                .with_text(&locators::total_label(), format!("Total: {total}"))
                .with_text(&locators::finish_button(), "Finish");
            with_menu(with_badge(screen, rows.len()))
        }

        pub fn complete(header: &str) -> MockScreen {
            let screen = MockScreen::new(format!("{BASE}checkout-complete.html"))
                .with_text(&locators::complete_header(), header)
                .with_text(&locators::back_home_button(), "Back Home");
            with_menu(screen)
        }

        pub fn details(name: &str, price: &str, badge: usize) -> MockScreen {
            let screen = MockScreen::new(format!("{BASE}inventory-item.html?id=2"))
                .with_text(&details::name(), name)
                .with_text(&details::price(), price)
                .with_text(&details::description(), "A description")
                .with(&details::image(), MockElement::text("").attr("src", "/img.jpg"))
                .with_text(&details::remove_button(), "Remove")
                .with_text(&details::back_button(), "Back to products");
            with_menu(with_badge(screen, badge))
        }
    }

    fn session(driver: MockDriver) -> Session<MockDriver> {
        let config = DriverConfig::new().explicit_wait(Duration::from_millis(30));
        Session::new(driver, config)
    }

    fn find(name: &str) -> Scenario<MockDriver> {
        registry::<MockDriver>()
            .into_iter()
            .find(|s| s.name == name)
            .unwrap()
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_names_are_unique() {
            let mut names: Vec<_> = registry::<MockDriver>().iter().map(|s| s.name).collect();
            assert_eq!(names.len(), 14);
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), 14);
        }

        #[test]
        fn test_select_by_substring() {
            let sorts: Vec<_> = select::<MockDriver>(Some("sort")).iter().map(|s| s.name).collect();
            assert_eq!(sorts, vec!["sort_by_option", "sort_response_time"]);
            assert!(select::<MockDriver>(Some("nothing")).is_empty());
            assert_eq!(select::<MockDriver>(None).len(), 14);
        }

        #[test]
        fn test_debug_shows_name() {
            assert!(format!("{:?}", find("login")).contains("\"login\""));
        }
    }

    mod login_tests {
        use super::*;

        #[tokio::test]
        async fn test_home_page_ui_passes() {
            let driver = MockDriver::new().route(BASE, storefront::login());
            let mut session = session(driver);
            find("home_page_ui").run(&mut session).await.unwrap();
        }

        #[tokio::test]
        async fn test_home_page_ui_wrong_hint_is_failure() {
            let screen = storefront::login_with_hint("hunter2");
            let mut session = session(MockDriver::new().route(BASE, screen));
            let err = find("home_page_ui").run(&mut session).await.unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("password hint"));
        }

        #[tokio::test]
        async fn test_login_negative_checks_every_banner() {
            let mut driver = MockDriver::new().route(BASE, storefront::login());
            for case in data::rejected_logins() {
                driver = driver.on_click(&locators::login_button(), storefront::rejected(case.error));
            }
            let mut session = session(driver);
            find("login_negative").run(&mut session).await.unwrap();

            let presses = session
                .driver()
                .history()
                .iter()
                .filter(|c| c.as_str() == "click:id=login-button")
                .count();
            assert_eq!(presses, data::rejected_logins().len());
        }

        #[tokio::test]
        async fn test_login_negative_wrong_banner() {
            let driver = MockDriver::new()
                .route(BASE, storefront::login())
                .on_click(&locators::login_button(), storefront::rejected("Epic sadface: nope"));
            let mut session = session(driver);
            let err = find("login_negative").run(&mut session).await.unwrap_err();
            assert!(err.is_assertion());
        }

        #[tokio::test]
        async fn test_missing_login_screen_is_error() {
            let mut session = session(MockDriver::new());
            let err = find("login").run(&mut session).await.unwrap_err();
            assert!(matches!(err, ShopError::Timeout { .. }));
            assert!(!err.is_assertion());
        }
    }

    mod sort_tests {
        use super::*;

        fn sorted(mode: SortMode) -> Vec<(&'static str, &'static str)> {
            let mut rows = storefront::catalogue_rows();
            match mode {
                SortMode::NameAscending => rows.sort_by(|a, b| a.0.cmp(b.0)),
                SortMode::NameDescending => rows.sort_by(|a, b| b.0.cmp(a.0)),
                SortMode::PriceAscending | SortMode::PriceDescending => {
                    rows.sort_by_key(|r| crate::money::Money::parse(r.1).unwrap());
                    if mode.is_descending() {
                        rows.reverse();
                    }
                }
            }
            rows
        }

        fn storefront_with_sorting(broken: Option<SortMode>) -> MockDriver {
            let initial = sorted(SortMode::NameAscending);
            let mut driver = MockDriver::new().route(BASE, storefront::login()).on_click(
                &locators::login_button(),
                storefront::inventory(&initial, SortMode::NameAscending, 0),
            );
            for mode in SortMode::ALL {
                let rows = if Some(mode) == broken {
                    initial.iter().rev().copied().collect()
                } else {
                    sorted(mode)
                };
                driver = driver.on_select(
                    &locators::sort_dropdown(),
                    mode.label(),
                    storefront::inventory(&rows, mode, 0),
                );
            }
            driver
        }

        #[tokio::test]
        async fn test_sort_by_option_passes() {
            let mut session = session(storefront_with_sorting(None));
            find("sort_by_option").run(&mut session).await.unwrap();
            assert!(session.driver().was_called("click:id=reset_sidebar_link"));
        }

        #[tokio::test]
        async fn test_sort_by_option_detects_wrong_order() {
            let mut session = session(storefront_with_sorting(Some(SortMode::PriceAscending)));
            let err = find("sort_by_option").run(&mut session).await.unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("Price (low to high)"));
        }

        #[tokio::test]
        async fn test_sort_response_time_passes() {
            let mut session = session(storefront_with_sorting(None));
            find("sort_response_time").run(&mut session).await.unwrap();
            assert!(session.driver().was_called("type:id=user-name:performance_glitch_user"));
        }
    }

    mod checkout_tests {
        use super::*;

        const ONESIE: [(&str, &str); 1] = [("Sauce Labs Onesie", "$7.99")];

        fn purchase_flow(total: &str) -> MockDriver {
            let rows = storefront::catalogue_rows();
            MockDriver::new()
                .route(BASE, storefront::login())
                .on_click(
                    &locators::login_button(),
                    storefront::inventory(&rows, SortMode::NameAscending, 0),
                )
                .on_click(
                    &locators::add_button(data::PURCHASE_PRODUCT),
                    storefront::inventory(&rows, SortMode::NameAscending, 1),
                )
                .on_click(&locators::cart_link(), storefront::cart(&ONESIE))
                .on_click(&locators::checkout_button(), storefront::checkout_info())
                .on_click(
                    &locators::continue_button(),
                    storefront::overview(&ONESIE, "$7.99", "$0.64", total),
                )
                .on_click(&locators::finish_button(), storefront::complete(SUCCESS_HEADER))
                .on_click(
                    &locators::back_home_button(),
                    storefront::inventory(&rows, SortMode::NameAscending, 0),
                )
        }

        #[tokio::test]
        async fn test_full_purchase_passes() {
            let mut session = session(purchase_flow("$8.63"));
            find("full_purchase").run(&mut session).await.unwrap();

            let driver = session.driver();
            assert!(driver.was_called("type:id=first-name:Lara"));
            assert!(driver.was_called("type:id=postal-code:US50203040"));
            assert!(driver.was_called("click:xpath=//button[text() = 'Finish']"));
            assert!(driver.was_called("click:id=reset_sidebar_link"));
        }

        #[tokio::test]
        async fn test_full_purchase_wrong_total_stops_before_finish() {
            let mut session = session(purchase_flow("$8.64"));
            let err = find("full_purchase").run(&mut session).await.unwrap_err();
            assert!(err.is_assertion());
            assert!(!session.driver().was_called("click:xpath=//button[text() = 'Finish']"));
        }

        #[tokio::test]
        async fn test_cart_prices_for_two_products() {
            let rows = storefront::catalogue_rows();
            let pair = [("Sauce Labs Backpack", "$29.99"), ("Sauce Labs Bike Light", "$9.99")];
            let driver = MockDriver::new()
                .route(BASE, storefront::login())
                .on_click(
                    &locators::login_button(),
                    storefront::inventory(&rows, SortMode::NameAscending, 0),
                )
                .on_click(
                    &locators::add_button(pair[0].0),
                    storefront::inventory(&rows, SortMode::NameAscending, 1),
                )
                .on_click(
                    &locators::add_button(pair[1].0),
                    storefront::inventory(&rows, SortMode::NameAscending, 2),
                )
                .on_click(&locators::cart_link(), storefront::cart(&pair))
                .on_click(&locators::checkout_button(), storefront::checkout_info())
                .on_click(
                    &locators::continue_button(),
                    storefront::overview(&pair, "$39.98", "$3.20", "$43.18"),
                );
            let mut session = session(driver);
            check_cart_prices(&mut session, &[pair[0].0, pair[1].0]).await.unwrap();
        }

        #[tokio::test]
        async fn test_cart_prices_wrong_tax() {
            let rows = storefront::catalogue_rows();
            let driver = MockDriver::new()
                .route(BASE, storefront::login())
                .on_click(
                    &locators::login_button(),
                    storefront::inventory(&rows, SortMode::NameAscending, 0),
                )
                .on_click(
                    &locators::add_button(ONESIE[0].0),
                    storefront::inventory(&rows, SortMode::NameAscending, 1),
                )
                .on_click(&locators::cart_link(), storefront::cart(&ONESIE))
                .on_click(&locators::checkout_button(), storefront::checkout_info())
                .on_click(
                    &locators::continue_button(),
                    storefront::overview(&ONESIE, "$7.99", "$0.63", "$8.62"),
                );
            let mut session = session(driver);
            let err = check_cart_prices(&mut session, &[ONESIE[0].0]).await.unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("tax: computed $0.64 but displayed $0.63"));
        }
    }

    mod add_via_details_tests {
        use super::*;

        /// Storefront where adding from a details page moves the badge to `badge_after_add`
        fn storefront_adding(badge_after_add: usize) -> MockDriver {
            let rows = storefront::catalogue_rows();
            let mut driver = MockDriver::new()
                .route(BASE, storefront::login())
                .on_click(&locators::login_button(), storefront::inventory(&rows, SortMode::NameAscending, 0))
                .on_click(
                    &details::back_button(),
                    storefront::inventory(&rows, SortMode::NameAscending, 1),
                );
            for product in data::CATALOGUE {
                let details_screen = |badge| {
                    storefront::details(product.name, product.price, badge)
                        .with_text(&details::add_button(), "Add to cart")
                };
                driver = driver
                    .on_click(&locators::product_link(product.name), details_screen(0))
                    .on_click(&details::add_button(), details_screen(badge_after_add))
                    .on_click(
                        &locators::cart_link(),
                        storefront::cart(&[(product.name, product.price)])
                            .with_text(&locators::continue_shopping_button(), "Continue Shopping"),
                    )
                    .on_click(
                        &locators::continue_shopping_button(),
                        storefront::inventory(&rows, SortMode::NameAscending, 1)
                            .with_text(&locators::remove_button(product.name), "Remove"),
                    );
            }
            driver
        }

        #[tokio::test]
        async fn test_add_via_product_page_passes() {
            let mut session = session(storefront_adding(1));
            find("add_via_product_page").run(&mut session).await.unwrap();

            let adds = session
                .driver()
                .history()
                .iter()
                .filter(|c| c.as_str() == "click:id=add-to-cart")
                .count();
            assert_eq!(adds, data::CATALOGUE.len());
        }

        #[tokio::test]
        async fn test_add_via_product_page_badge_not_updated() {
            let mut session = session(storefront_adding(0));
            let err = find("add_via_product_page").run(&mut session).await.unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("cart badge after adding"));
        }
    }

    mod removal_tests {
        use super::*;

        /// Listing after `added` products went into the cart one by one
        fn after_adding(added: usize) -> MockScreen {
            let rows = storefront::catalogue_rows();
            storefront::inventory(&rows, SortMode::NameAscending, added)
                .with_texts(&locators::add_all_buttons(), vec!["Add to cart"; rows.len() - added])
        }

        #[tokio::test]
        async fn test_remove_specific_products_counts_down() {
            let rows = storefront::catalogue_rows();
            let mut driver = MockDriver::new()
                .route(BASE, storefront::login())
                .on_click(&locators::login_button(), after_adding(0));
            for added in 1..=rows.len() {
                driver = driver.on_click(&locators::add_all_buttons(), after_adding(added));
            }
            for (index, product) in data::CATALOGUE.iter().enumerate() {
                let left = data::CATALOGUE.len() - index;
                driver = driver
                    .on_click(
                        &locators::product_link(product.name),
                        storefront::details(product.name, product.price, left),
                    )
                    .on_click(
                        &details::remove_button(),
                        storefront::details(product.name, product.price, left - 1),
                    )
                    .on_click(
                        &details::back_button(),
                        storefront::inventory(&rows, SortMode::NameAscending, left - 1),
                    );
            }
            let mut session = session(driver);
            find("remove_specific_products").run(&mut session).await.unwrap();

            let removals = session
                .driver()
                .history()
                .iter()
                .filter(|c| c.as_str() == "click:id=remove")
                .count();
            assert_eq!(removals, data::CATALOGUE.len());
        }

        #[tokio::test]
        async fn test_remove_specific_products_badge_stuck() {
            let rows = storefront::catalogue_rows();
            let first = data::CATALOGUE[0];
            let mut driver = MockDriver::new()
                .route(BASE, storefront::login())
                .on_click(&locators::login_button(), after_adding(0))
                .on_click(
                    &locators::product_link(first.name),
                    storefront::details(first.name, first.price, rows.len()),
                );
            for added in 1..=rows.len() {
                driver = driver.on_click(&locators::add_all_buttons(), after_adding(added));
            }
            let mut session = session(driver);
            let err = find("remove_specific_products").run(&mut session).await.unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("expected 5, got 6"));
        }
    }
}
