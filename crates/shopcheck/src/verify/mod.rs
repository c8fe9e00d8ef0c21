//! Pure verifiers over values already read from the page.
//!
//! Both verifiers return `Ok(false)` or `false` for a legitimate mismatch and
//! reserve errors for input they cannot interpret.

mod price;
mod sort;

pub use price::{
    verify_subtotal, verify_tax, verify_total, CartSnapshot, LineItem, PriceReport, TaxRate,
};
pub use sort::{verify_products_sorted, verify_sorted, verify_sorted_label, ProductRow, SortMode};
