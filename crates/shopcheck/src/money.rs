//! Currency amounts as displayed by the storefront.
//!
//! Amounts are exact decimals. Every comparison the verifiers make goes
//! through [`Money::round_cents`], which rounds half to even at two places.

use crate::result::{ShopError, ShopResult};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use std::sync::OnceLock;

/// Optional `Label:` prefix, optional `$`, then an unsigned or signed amount.
fn currency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z][A-Za-z ]*:\s*)?\$?\s*(-?[0-9]+(?:\.[0-9]+)?)$")
            .expect("currency pattern is valid")
    })
}

/// A non-negative currency amount, at most [`Money::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted amount, one quadrillion dollars
    pub const MAX: Self = Self(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

    /// Wrap a decimal amount
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Parse`] for negative amounts and amounts above [`Money::MAX`]
    pub fn new(amount: Decimal) -> ShopResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ShopError::parse(
                amount.to_string(),
                "currency amounts cannot be negative",
            ));
        }
        if amount > Self::MAX.0 {
            return Err(ShopError::parse(amount.to_string(), "amount out of range"));
        }
        Ok(Self(amount))
    }

    /// Build from a whole number of cents
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse displayed currency text.
    ///
    /// Accepts `"12.34"`, `"$12.34"` and labelled values such as
    /// `"Item total: $39.98"`, `"Tax: $3.20"` or `"Total: $43.18"`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Parse`] when the text holds no amount or a negative one
    pub fn parse(text: &str) -> ShopResult<Self> {
        let trimmed = text.trim();
        let captures = currency_pattern()
            .captures(trimmed)
            .ok_or_else(|| ShopError::parse(text, "not a currency amount"))?;
        let amount = Decimal::from_str(&captures[1])
            .map_err(|e| ShopError::parse(text, e.to_string()))?;
        Self::new(amount).map_err(|e| match e {
            ShopError::Parse { reason, .. } => ShopError::parse(text, reason),
            other => other,
        })
    }

    /// The underlying decimal
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Round to whole cents, half to even
    #[must_use]
    pub fn round_cents(self) -> Self {
        Self(round_cents(self.0))
    }

    /// Multiply by a rate (e.g. a tax rate); the result is not rounded.
    ///
    /// Saturates instead of overflowing.
    #[must_use]
    pub fn scaled(self, rate: Decimal) -> Self {
        Self(self.0.saturating_mul(rate))
    }
}

/// Round a decimal to two places, half to even.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

impl Add for Money {
    type Output = Self;

    // Saturating: a sum past Decimal::MAX can never equal a displayed amount.
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = ShopError;

    fn from_str(s: &str) -> ShopResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
