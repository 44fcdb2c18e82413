//! Monetary amounts and their display format

use crate::error::ModelError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create amount
    ///
    /// # Errors
    /// `ModelError::NegativeAmount` below zero
    pub fn new(value: Decimal) -> Result<Self, ModelError> {
        if value < Decimal::ZERO {
            return Err(ModelError::NegativeAmount(value));
        }
        Ok(Self(value))
    }

    /// Whole-unit amount
    #[inline]
    #[must_use]
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Underlying decimal
    #[inline]
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ModelError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Grouped number rendering for grid cells
///
/// Thousands grouping with no forced decimal places: `5000` → `5,000`,
/// `1234.5` → `1,234.5`. Fractions are rounded to `max_fraction_digits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Separator between groups of three integer digits
    pub group_separator: String,
    /// Separator between integer and fraction
    pub decimal_separator: String,
    /// Maximum digits after the decimal separator
    pub max_fraction_digits: u32,
}

impl NumberFormat {
    /// Create default (en-US style) format
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With group separator
    #[inline]
    #[must_use]
    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    /// With decimal separator
    #[inline]
    #[must_use]
    pub fn with_decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    /// With maximum fraction digits
    #[inline]
    #[must_use]
    pub fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Render an amount
    #[must_use]
    pub fn format(&self, amount: Amount) -> String {
        let rounded = amount
            .0
            .round_dp_with_strategy(self.max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let text = rounded.to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut out = group_digits(int_part, &self.group_separator);
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            max_fraction_digits: 3,
        }
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(text: &str) -> Amount {
        Amount::new(Decimal::from_str(text).unwrap()).unwrap()
    }

    #[test]
    fn negative_rejected() {
        assert!(Amount::new(Decimal::from_str("-0.01").unwrap()).is_err());
        assert!(Amount::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn grouping() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(amount("5000")), "5,000");
        assert_eq!(fmt.format(amount("999")), "999");
        assert_eq!(fmt.format(amount("202175")), "202,175");
        assert_eq!(fmt.format(amount("1234567")), "1,234,567");
        assert_eq!(fmt.format(Amount::ZERO), "0");
    }

    #[test]
    fn no_forced_decimals() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(amount("5000.00")), "5,000");
        assert_eq!(fmt.format(amount("1234.50")), "1,234.5");
    }

    #[test]
    fn fraction_rounding() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(amount("0.12345")), "0.123");
        assert_eq!(fmt.format(amount("1.0005")), "1.001");
        assert_eq!(fmt.format(amount("9999.9999")), "10,000");
    }

    #[test]
    fn custom_separators() {
        let fmt = NumberFormat::new()
            .with_group_separator(".")
            .with_decimal_separator(",")
            .with_max_fraction_digits(2);
        assert_eq!(fmt.format(amount("1234567.891")), "1.234.567,89");
    }

    #[test]
    fn serde_rejects_negative() {
        let parsed: Result<Amount, _> = serde_json::from_str("\"-5\"");
        assert!(parsed.is_err());
        let ok: Amount = serde_json::from_str("4905").unwrap();
        assert_eq!(ok, Amount::from_units(4905));
    }
}
