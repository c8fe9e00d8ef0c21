//! Checkout summary verification.
//!
//! The overview screen shows every cart line with its price plus three
//! summary fields. Three identities must hold after rounding to cents:
//!
//! - subtotal = sum of line prices
//! - tax = subtotal x rate
//! - total = subtotal + tax

use crate::money::Money;
use crate::result::{ShopError, ShopResult};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Sales tax rate applied by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// The storefront's fixed 8% rate
    #[must_use]
    pub fn standard() -> Self {
        Self(Decimal::new(8, 2))
    }

    /// A custom rate, as a fraction (0.08 for 8%)
    #[must_use]
    pub const fn new(rate: Decimal) -> Self {
        Self(rate)
    }

    /// The rate as a fraction
    #[must_use]
    pub const fn rate(self) -> Decimal {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

impl FromStr for TaxRate {
    type Err = ShopError;

    /// Accepts a fraction (`0.08`) or a percentage (`8%`).
    fn from_str(s: &str) -> ShopResult<Self> {
        let text = s.trim();
        let (digits, percent) = match text.strip_suffix('%') {
            Some(rest) => (rest.trim(), true),
            None => (text, false),
        };
        let rate = Decimal::from_str(digits).map_err(|e| ShopError::parse(s, e.to_string()))?;
        let rate = if percent { rate / Decimal::ONE_HUNDRED } else { rate };
        if rate.is_sign_negative() {
            return Err(ShopError::parse(s, "tax rate cannot be negative"));
        }
        Ok(Self(rate))
    }
}

/// One product row as rendered in the cart or overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Product name
    pub name: String,
    /// Displayed price
    pub price: Money,
}

impl LineItem {
    /// Create a line item
    #[must_use]
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Parse a line item from its displayed price text
    pub fn parse(name: impl Into<String>, price_text: &str) -> ShopResult<Self> {
        Ok(Self::new(name, Money::parse(price_text)?))
    }
}

/// Subtotal check: rounded sum of line prices equals the rounded displayed subtotal.
///
/// An empty cart sums to `0.00`.
#[must_use]
pub fn verify_subtotal(items: &[LineItem], displayed_subtotal: Money) -> bool {
    let calc: Money = items.iter().map(|item| item.price).sum();
    calc.round_cents() == displayed_subtotal.round_cents()
}

/// Tax check: rounded `subtotal x rate` equals the rounded displayed tax.
#[must_use]
pub fn verify_tax(displayed_subtotal: Money, displayed_tax: Money, rate: TaxRate) -> bool {
    displayed_subtotal.scaled(rate.rate()).round_cents() == displayed_tax.round_cents()
}

/// Total check: rounded `subtotal + tax` equals the rounded displayed total.
#[must_use]
pub fn verify_total(displayed_subtotal: Money, displayed_tax: Money, displayed_total: Money) -> bool {
    (displayed_subtotal + displayed_tax).round_cents() == displayed_total.round_cents()
}

/// The overview screen's financial state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    /// Lines in display order
    pub items: Vec<LineItem>,
    /// Displayed subtotal
    pub subtotal: Money,
    /// Displayed tax
    pub tax: Money,
    /// Displayed total
    pub total: Money,
}

impl CartSnapshot {
    /// Build a snapshot from raw displayed text.
    ///
    /// `lines` pairs each product name with its price text; the summary
    /// texts may carry their labels (`"Item total: $39.98"`).
    pub fn from_text(
        lines: &[(String, String)],
        subtotal_text: &str,
        tax_text: &str,
        total_text: &str,
    ) -> ShopResult<Self> {
        let items = lines
            .iter()
            .map(|(name, price)| LineItem::parse(name.clone(), price))
            .collect::<ShopResult<Vec<_>>>()?;
        Ok(Self {
            items,
            subtotal: Money::parse(subtotal_text)?,
            tax: Money::parse(tax_text)?,
            total: Money::parse(total_text)?,
        })
    }

    /// Run all three checks
    #[must_use]
    pub fn verify(&self, rate: TaxRate) -> PriceReport {
        let computed_subtotal: Money = self.items.iter().map(|item| item.price).sum();
        PriceReport {
            subtotal_ok: verify_subtotal(&self.items, self.subtotal),
            tax_ok: verify_tax(self.subtotal, self.tax, rate),
            total_ok: verify_total(self.subtotal, self.tax, self.total),
            computed_subtotal: computed_subtotal.round_cents(),
            computed_tax: self.subtotal.scaled(rate.rate()).round_cents(),
            computed_total: (self.subtotal + self.tax).round_cents(),
            displayed: self.clone(),
        }
    }
}

/// Outcome of verifying a [`CartSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceReport {
    /// Subtotal identity holds
    pub subtotal_ok: bool,
    /// Tax identity holds
    pub tax_ok: bool,
    /// Total identity holds
    pub total_ok: bool,
    /// Rounded sum of line prices
    pub computed_subtotal: Money,
    /// Rounded displayed subtotal x rate
    pub computed_tax: Money,
    /// Rounded displayed subtotal + displayed tax
    pub computed_total: Money,
    /// The snapshot that was checked
    pub displayed: CartSnapshot,
}

impl PriceReport {
    /// All three identities hold
    #[must_use]
    pub const fn all_ok(&self) -> bool {
        self.subtotal_ok && self.tax_ok && self.total_ok
    }

    /// Convert mismatches into an assertion failure naming each one
    pub fn into_result(self) -> ShopResult<()> {
        let mut problems = Vec::new();
        if !self.subtotal_ok {
            problems.push(format!(
                "subtotal: computed {} but displayed {}",
                self.computed_subtotal, self.displayed.subtotal
            ));
        }
        if !self.tax_ok {
            problems.push(format!(
                "tax: computed {} but displayed {}",
                self.computed_tax, self.displayed.tax
            ));
        }
        if !self.total_ok {
            problems.push(format!(
                "total: computed {} but displayed {}",
                self.computed_total, self.displayed.total
            ));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ShopError::assertion(problems.join("; ")))
        }
    }
}
