//! Listing sort-order verification.
//!
//! A displayed list is correctly sorted when it is exactly equal to a stable
//! sorted copy of itself. Names compare case-sensitively by code point, so
//! `"Zebra"` sorts before `"apple"`.

use crate::money::Money;
use crate::result::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The four orderings offered by the inventory sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    /// Name (A to Z)
    NameAscending,
    /// Name (Z to A)
    NameDescending,
    /// Price (low to high)
    PriceAscending,
    /// Price (high to low)
    PriceDescending,
}

impl SortMode {
    /// Every mode in dropdown order
    pub const ALL: [Self; 4] = [
        Self::NameAscending,
        Self::NameDescending,
        Self::PriceAscending,
        Self::PriceDescending,
    ];

    /// Visible label in the dropdown
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAscending => "Name (A to Z)",
            Self::NameDescending => "Name (Z to A)",
            Self::PriceAscending => "Price (low to high)",
            Self::PriceDescending => "Price (high to low)",
        }
    }

    /// `value` attribute of the dropdown option
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::NameAscending => "az",
            Self::NameDescending => "za",
            Self::PriceAscending => "lohi",
            Self::PriceDescending => "hilo",
        }
    }

    /// Whether the mode orders by price
    #[must_use]
    pub const fn is_price(self) -> bool {
        matches!(self, Self::PriceAscending | Self::PriceDescending)
    }

    /// Whether the mode orders high to low / Z to A
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::NameDescending | Self::PriceDescending)
    }

    fn direct<T: Ord>(self, a: &T, b: &T) -> Ordering {
        if self.is_descending() {
            b.cmp(a)
        } else {
            a.cmp(b)
        }
    }
}

impl FromStr for SortMode {
    type Err = ShopError;

    /// Accepts either the visible label or the option value.
    fn from_str(s: &str) -> ShopResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.label() == wanted || mode.value() == wanted)
            .ok_or_else(|| ShopError::UnsupportedSortMode {
                mode: s.to_string(),
            })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    /// Product name
    pub name: String,
    /// Price text as displayed (`"$29.99"`)
    pub price: String,
}

impl ProductRow {
    /// Create a row
    #[must_use]
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

/// Check that `values` is ordered according to `mode`.
///
/// For name modes `values` are product names; for price modes they are price
/// texts such as `"$12.34"`, parsed before comparison.
///
/// # Errors
///
/// Returns [`ShopError::Parse`] when a price mode meets a malformed price.
pub fn verify_sorted<S: AsRef<str>>(values: &[S], mode: SortMode) -> ShopResult<bool> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    if mode.is_price() {
        let prices = values
            .iter()
            .map(|v| Money::parse(v.as_ref()))
            .collect::<ShopResult<Vec<_>>>()?;
        order.sort_by(|&a, &b| mode.direct(&prices[a], &prices[b]));
    } else {
        order.sort_by(|&a, &b| mode.direct(&values[a].as_ref(), &values[b].as_ref()));
    }

    // Compare the displayed text, not the keys, so "$8" and "$8.00" tied
    // in price must still appear in input order.
    Ok(order
        .iter()
        .enumerate()
        .all(|(position, &source)| values[position].as_ref() == values[source].as_ref()))
}

/// Like [`verify_sorted`], with the mode given as a dropdown label or value.
///
/// # Errors
///
/// Returns [`ShopError::UnsupportedSortMode`] for an unknown label.
pub fn verify_sorted_label<S: AsRef<str>>(values: &[S], label: &str) -> ShopResult<bool> {
    let mode: SortMode = label.parse()?;
    verify_sorted(values, mode)
}

/// Check a product listing, picking the name or price column from `mode`.
pub fn verify_products_sorted(rows: &[ProductRow], mode: SortMode) -> ShopResult<bool> {
    let column: Vec<&str> = if mode.is_price() {
        rows.iter().map(|r| r.price.as_str()).collect()
    } else {
        rows.iter().map(|r| r.name.as_str()).collect()
    };
    verify_sorted(&column, mode)
}
