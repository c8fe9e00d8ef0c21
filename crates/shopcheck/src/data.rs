//! Fixed test data for the storefront.

use crate::verify::SortMode;
use std::time::Duration;

/// Password shared by every demo account
pub const PASSWORD: &str = "secret_sauce";

/// Default account for scenarios that only need to be logged in
pub const STANDARD_USER: &str = "standard_user";

/// Accounts that can log in
pub const VALID_USERS: [&str; 5] = [
    "standard_user",
    "problem_user",
    "performance_glitch_user",
    "error_user",
    "visual_user",
];

/// Account that is refused with the locked-out message
pub const LOCKED_USER: &str = "locked_out_user";

/// Account used for response-time checks under load
pub const SLOW_USER: &str = "performance_glitch_user";

/// Usernames that must be rejected; whitespace is significant
pub const INVALID_USERS: [&str; 4] = [
    "Darth_Vaders_Nephew",
    "standard_users ",
    " standard_user",
    "standard_user ",
];

/// Passwords that must be rejected; whitespace is significant
pub const INVALID_PASSWORDS: [&str; 4] = [
    "bs password",
    "*secret_sauce",
    " secret_sauce",
    "secret_sauce ",
];

/// Placeholder of the username field
pub const USERNAME_PLACEHOLDER: &str = "Username";

/// Placeholder of the password field
pub const PASSWORD_PLACEHOLDER: &str = "Password";

/// Document title on every screen
pub const PAGE_TITLE: &str = "Swag Labs";

/// Heading of the inventory
pub const INVENTORY_TITLE: &str = "Products";

/// Error banners on the login screen
pub mod login_errors {
    pub const EMPTY_USERNAME: &str = "Epic sadface: Username is required";
    pub const EMPTY_PASSWORD: &str = "Epic sadface: Password is required";
    pub const INVALID_CREDENTIALS: &str =
        "Epic sadface: Username and password do not match any user in this service";
    pub const LOCKED_USER: &str = "Epic sadface: Sorry, this user has been locked out.";
}

/// Error banners on the checkout information form
pub mod checkout_errors {
    pub const EMPTY_FIRST_NAME: &str = "Error: First Name is required";
    pub const EMPTY_LAST_NAME: &str = "Error: Last Name is required";
    pub const EMPTY_POSTAL_CODE: &str = "Error: Postal Code is required";
}

/// Credentials the login form must refuse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedLogin {
    pub username: &'static str,
    pub password: &'static str,
    /// Banner shown after pressing login
    pub error: &'static str,
}

impl RejectedLogin {
    const fn new(username: &'static str, password: &'static str, error: &'static str) -> Self {
        Self {
            username,
            password,
            error,
        }
    }
}

/// Every refused login: blank fields, unknown users, wrong passwords, the
/// locked account
#[must_use]
pub fn rejected_logins() -> Vec<RejectedLogin> {
    let mut cases = vec![
        RejectedLogin::new("", "", login_errors::EMPTY_USERNAME),
        RejectedLogin::new("", PASSWORD, login_errors::EMPTY_USERNAME),
        RejectedLogin::new(STANDARD_USER, "", login_errors::EMPTY_PASSWORD),
    ];
    cases.extend(
        INVALID_USERS
            .iter()
            .copied()
            .map(|user| RejectedLogin::new(user, PASSWORD, login_errors::INVALID_CREDENTIALS)),
    );
    cases.extend(
        INVALID_PASSWORDS
            .iter()
            .copied()
            .map(|password| RejectedLogin::new(STANDARD_USER, password, login_errors::INVALID_CREDENTIALS)),
    );
    cases.push(RejectedLogin::new(LOCKED_USER, PASSWORD, login_errors::LOCKED_USER));
    cases
}

/// A catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Name as listed
    pub name: &'static str,
    /// Price text as listed
    pub price: &'static str,
}

/// The six products the storefront sells
pub const CATALOGUE: [Product; 6] = [
    Product {
        name: "Sauce Labs Backpack",
        price: "$29.99",
    },
    Product {
        name: "Sauce Labs Bike Light",
        price: "$9.99",
    },
    Product {
        name: "Sauce Labs Bolt T-Shirt",
        price: "$15.99",
    },
    Product {
        name: "Sauce Labs Fleece Jacket",
        price: "$49.99",
    },
    Product {
        name: "Sauce Labs Onesie",
        price: "$7.99",
    },
    Product {
        name: "Test.allTheThings() T-Shirt (Red)",
        price: "$15.99",
    },
];

/// Names of every catalogue product
#[must_use]
pub fn product_names() -> Vec<&'static str> {
    CATALOGUE.iter().map(|p| p.name).collect()
}

/// Look up a catalogue entry by name
#[must_use]
pub fn product(name: &str) -> Option<&'static Product> {
    CATALOGUE.iter().find(|p| p.name == name)
}

/// Cart selections exercised by the add and price scenarios
pub const PRODUCT_SELECTIONS: [&[&str]; 4] = [
    &["Sauce Labs Backpack"],
    &["Sauce Labs Backpack", "Sauce Labs Bike Light"],
    &["Sauce Labs Onesie", "Sauce Labs Fleece Jacket", "Sauce Labs Bolt T-Shirt"],
    &[
        "Sauce Labs Backpack",
        "Sauce Labs Bike Light",
        "Sauce Labs Bolt T-Shirt",
        "Sauce Labs Fleece Jacket",
        "Sauce Labs Onesie",
        "Test.allTheThings() T-Shirt (Red)",
    ],
];

/// Product bought end to end
pub const PURCHASE_PRODUCT: &str = "Sauce Labs Onesie";

/// Every sort dropdown label
#[must_use]
pub fn sort_labels() -> Vec<&'static str> {
    SortMode::ALL.iter().map(|m| m.label()).collect()
}

/// Longest acceptable login
pub const MAX_LOGIN_TIME: Duration = Duration::from_secs(5);

/// Longest acceptable re-sort of the listing
pub const MAX_SORT_TIME: Duration = Duration::from_secs(5);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::product_slug;
    use crate::money::Money;

    #[test]
    fn test_catalogue_prices_parse() {
        for p in CATALOGUE {
            assert!(Money::parse(p.price).is_ok(), "{}", p.name);
        }
    }

    #[test]
    fn test_selections_are_in_catalogue() {
        for selection in PRODUCT_SELECTIONS {
            for name in selection {
                assert!(product(name).is_some(), "{name}");
            }
        }
        assert!(product(PURCHASE_PRODUCT).is_some());
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<String> = product_names().into_iter().map(product_slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), CATALOGUE.len());
    }

    #[test]
    fn test_invalid_users_are_not_valid() {
        for user in INVALID_USERS {
            assert!(!VALID_USERS.contains(&user));
        }
        assert!(!VALID_USERS.contains(&LOCKED_USER));
    }

    #[test]
    fn test_rejected_logins() {
        let cases = rejected_logins();
        assert_eq!(cases.len(), 3 + INVALID_USERS.len() + INVALID_PASSWORDS.len() + 1);
        assert!(cases
            .iter()
            .all(|c| !(VALID_USERS.contains(&c.username) && c.password == PASSWORD)));
        assert_eq!(cases.last().map(|c| c.error), Some(login_errors::LOCKED_USER));
    }

    #[test]
    fn test_sort_labels() {
        assert_eq!(sort_labels().len(), 4);
        assert_eq!(sort_labels()[0], "Name (A to Z)");
    }
}
