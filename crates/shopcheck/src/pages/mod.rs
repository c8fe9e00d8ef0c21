//! Page objects for the Swag Labs storefront.
//!
//! Every page wraps a [`PageContext`]; actions that leave a screen consume
//! the page and return the next one.

mod cart;
mod checkout_complete;
mod checkout_info;
mod checkout_overview;
pub(crate) mod common;
mod inventory;
mod login;
pub(crate) mod product_details;
mod sidebar;

pub use cart::CartPage;
pub use checkout_complete::{CheckoutCompletePage, SUCCESS_HEADER};
pub use checkout_info::{CheckoutInfoPage, CustomerInfo};
pub use checkout_overview::CheckoutOverviewPage;
pub use common::PageContext;
pub use inventory::InventoryPage;
pub use login::LoginPage;
pub use product_details::ProductDetailsPage;
pub use sidebar::SideBar;
