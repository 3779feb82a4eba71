//! Product price in Brazilian reais.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
}

/// A strictly positive amount in reais (BRL).
///
/// ```
/// use startify_core::Price;
///
/// let price = Price::parse("49,9").unwrap();
/// assert_eq!(price.to_string(), "R$ 49.90");
/// assert!(Price::parse("0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Currency symbol used when displaying prices.
    pub const SYMBOL: &'static str = "R$";

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if the amount is not above zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount))
    }

    /// Parse a price typed into the product form.
    ///
    /// A comma is accepted as the decimal separator (`"19,90"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, is not a decimal
    /// number, or is not above zero.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let normalized = s.replace(',', ".");
        let amount = Decimal::from_str(&normalized).map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount rounded to cents, without the currency symbol (`"49.90"`).
    #[must_use]
    pub fn plain(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::SYMBOL, self.plain())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_dot_and_comma() {
        assert_eq!(Price::parse("10.5").unwrap().plain(), "10.50");
        assert_eq!(Price::parse(" 10,5 ").unwrap().plain(), "10.50");
        assert_eq!(Price::parse("97").unwrap().plain(), "97.00");
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        assert_eq!(Price::parse("0"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("0.00"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("-3"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("ten"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("1.000,00"), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Price::parse("19.999").unwrap().to_string(), "R$ 20.00");
        assert_eq!(Price::parse("0.005").unwrap().to_string(), "R$ 0.01");
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        assert!(serde_json::from_str::<Price>("\"12.00\"").is_ok());
        assert!(serde_json::from_str::<Price>("\"0\"").is_err());
    }
}
