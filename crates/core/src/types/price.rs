//! Rouble price representation using decimal arithmetic.

use std::fmt;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing user-entered price text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Input could not be parsed as a decimal number.
    #[error("not a number: {0}")]
    NotANumber(String),

    /// Prices are never negative.
    #[error("price must not be negative")]
    Negative,
}

/// A price in roubles.
///
/// The backend serializes rouble amounts as decimal strings
/// (e.g. `"price_rub": "100"`), which the `serde-with-str` feature of
/// `rust_decimal` handles transparently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero roubles.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole rouble amount.
    #[must_use]
    pub fn from_rub(rub: u32) -> Self {
        Self(Decimal::from(rub))
    }

    /// Parse user-entered price text.
    ///
    /// Accepts either `.` or `,` as the decimal separator, since the admin
    /// forms normalize both.
    ///
    /// # Errors
    ///
    /// Returns an error for non-numeric or negative input.
    pub fn parse_input(input: &str) -> Result<Self, PriceError> {
        let normalized = input.trim().replace(',', ".");
        let amount = normalized
            .parse::<Decimal>()
            .map_err(|_| PriceError::NotANumber(input.to_string()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a count (line quantity, rental days).
    #[must_use]
    pub fn times(&self, count: u32) -> Self {
        Self(self.0 * Decimal::from(count))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_plain() {
        assert_eq!(Price::parse_input("100"), Ok(Price::from_rub(100)));
    }

    #[test]
    fn test_parse_input_comma_separator() {
        let price = Price::parse_input("99,50").expect("parse");
        assert_eq!(price.amount().to_string(), "99.50");
    }

    #[test]
    fn test_parse_input_rejects_garbage() {
        assert!(matches!(
            Price::parse_input("12a"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_input_rejects_negative() {
        assert_eq!(Price::parse_input("-5"), Err(PriceError::Negative));
    }

    #[test]
    fn test_times_and_add() {
        let total = Price::from_rub(100).times(3) + Price::from_rub(50);
        assert_eq!(total, Price::from_rub(350));
    }

    #[test]
    fn test_serde_string_form() {
        let price: Price = serde_json::from_str("\"100\"").expect("deserialize");
        assert_eq!(price, Price::from_rub(100));
    }
}
