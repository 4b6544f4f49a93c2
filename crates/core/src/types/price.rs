//! Coffee price represented with decimal arithmetic.
//!
//! Prices are entered as free text on the add-cafe form and stored as text,
//! normalised to two decimal places so `"3.5"` and `"3.50"` read the same.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CoffeePrice`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a decimal number")]
    NotDecimal,
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// The price of a regular coffee, with two decimal places.
///
/// ## Examples
///
/// ```
/// use cafe_directory_core::CoffeePrice;
///
/// assert_eq!(CoffeePrice::parse("3.5").unwrap().to_string(), "3.50");
/// assert_eq!(CoffeePrice::parse("2.345").unwrap().to_string(), "2.35");
/// assert!(CoffeePrice::parse("cheap").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoffeePrice(Decimal);

impl CoffeePrice {
    /// Number of decimal places kept.
    pub const SCALE: u32 = 2;

    /// Parse a `CoffeePrice` from a string, rounding half away from zero
    /// to two places.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal, or negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(trimmed).map_err(|_| PriceError::NotDecimal)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        let mut amount =
            amount.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(Self::SCALE);
        Ok(Self(amount))
    }

    /// Returns the amount as a decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for CoffeePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CoffeePrice {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_two_places() {
        assert_eq!(CoffeePrice::parse("3.50").unwrap().to_string(), "3.50");
        assert_eq!(CoffeePrice::parse("3").unwrap().to_string(), "3.00");
        assert_eq!(CoffeePrice::parse(" 2.4 ").unwrap().to_string(), "2.40");
    }

    #[test]
    fn test_parse_rounds_extra_places() {
        assert_eq!(CoffeePrice::parse("2.999").unwrap().to_string(), "3.00");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(CoffeePrice::parse("   "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_not_decimal() {
        assert_eq!(CoffeePrice::parse("£2.80"), Err(PriceError::NotDecimal));
        assert_eq!(CoffeePrice::parse("cheap"), Err(PriceError::NotDecimal));
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(CoffeePrice::parse("-1.00"), Err(PriceError::Negative));
    }

    #[test]
    fn test_zero_is_allowed() {
        assert_eq!(CoffeePrice::parse("0").unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_from_str() {
        let price: CoffeePrice = "1.2".parse().unwrap();
        assert_eq!(price.amount(), Decimal::new(120, 2));
    }
}
