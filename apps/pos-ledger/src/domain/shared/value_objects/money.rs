//! Money value object for prices and totals.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::{DomainError, Quantity};

/// A monetary amount in the shop currency.
///
/// Represented as a Decimal so cart and ledger arithmetic is exact. All
/// arithmetic is checked: a result outside the Decimal range is an error.
/// The SQLite stores keep `REAL` columns; conversion happens at the adapter
/// boundary through [`Money::from_f64`] and [`Money::to_f64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Convert a stored `REAL` value.
    ///
    /// # Errors
    ///
    /// Returns error for NaN or infinite input.
    pub fn from_f64(amount: f64) -> Result<Self, DomainError> {
        Decimal::try_from(amount)
            .map(Self)
            .map_err(|_| DomainError::invalid("money", format!("{amount} is not a finite number")))
    }

    /// Parse a user-entered price such as `"45"` or `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a number.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|_| DomainError::invalid("price", "Price must be a number"))
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Value for the `REAL` storage columns.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Sum of two amounts.
    ///
    /// # Errors
    ///
    /// Returns error if the sum is out of range.
    pub fn checked_add(self, rhs: Self) -> Result<Self, DomainError> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(out_of_range)
    }

    /// This unit price times a quantity.
    ///
    /// # Errors
    ///
    /// Returns error if the product is out of range.
    pub fn checked_mul(self, quantity: Quantity) -> Result<Self, DomainError> {
        self.0
            .checked_mul(Decimal::from(quantity.get()))
            .map(Self)
            .ok_or_else(out_of_range)
    }

    /// Sum of every amount in `amounts`; zero when empty.
    ///
    /// # Errors
    ///
    /// Returns error if a partial sum is out of range.
    pub fn checked_sum<I>(amounts: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }

    /// Reject negative amounts.
    ///
    /// # Errors
    ///
    /// Returns error naming `field` if the amount is below zero.
    pub fn ensure_non_negative(self, field: &str) -> Result<Self, DomainError> {
        if self.is_negative() {
            return Err(DomainError::invalid(field, "must not be negative"));
        }
        Ok(self)
    }

    /// Format with a currency symbol, e.g. `₱45.00`.
    #[must_use]
    pub fn with_symbol(&self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

fn out_of_range() -> DomainError {
    DomainError::invalid("amount", "exceeds the supported range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test]
    fn money_new_and_display() {
        let m = Money::new(dec!(150.5));
        assert_eq!(format!("{m}"), "150.50");
    }

    #[test]
    fn money_with_symbol() {
        let m = Money::new(dec!(45.5));
        assert_eq!(m.with_symbol("₱"), "₱45.50");
    }

    #[test]
    fn money_from_f64_roundtrip() {
        let m = Money::from_f64(50.0).unwrap();
        assert_eq!(m.amount(), dec!(50));
        assert!((m.to_f64() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn money_from_f64_rejects_nan() {
        assert!(Money::from_f64(f64::NAN).is_err());
        assert!(Money::from_f64(f64::INFINITY).is_err());
    }

    #[test_case("45", dec!(45) ; "integer")]
    #[test_case("12.50", dec!(12.50) ; "two places")]
    #[test_case("  7.25 ", dec!(7.25) ; "surrounding whitespace")]
    #[test_case("1e2", dec!(100) ; "scientific")]
    fn money_parse_accepts(text: &str, expected: Decimal) {
        assert_eq!(Money::parse(text).unwrap().amount(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("abc" ; "letters")]
    #[test_case("12,50" ; "comma")]
    fn money_parse_rejects(text: &str) {
        let err = Money::parse(text).unwrap_err();
        assert!(err.to_string().contains("Price must be a number"));
    }

    #[test]
    fn money_ensure_non_negative() {
        assert!(Money::new(dec!(-1)).ensure_non_negative("price").is_err());
        assert!(Money::ZERO.ensure_non_negative("price").is_ok());
    }

    #[test]
    fn money_times_quantity() {
        let unit = Money::new(dec!(12.5));
        let qty = Quantity::new(3).unwrap();
        assert_eq!(unit.checked_mul(qty).unwrap().amount(), dec!(37.5));
    }

    #[test]
    fn money_sum() {
        let total = Money::checked_sum([Money::new(dec!(1)), Money::new(dec!(2.5))]).unwrap();
        assert_eq!(total.amount(), dec!(3.5));
        assert_eq!(Money::checked_sum([]).unwrap(), Money::ZERO);
    }

    #[test]
    fn largest_price_overflows_instead_of_panicking() {
        let top = Money::parse("79228162514264337593543950335").unwrap();
        let two = Quantity::new(2).unwrap();

        let err = top.checked_mul(two).unwrap_err();
        assert!(err.to_string().contains("exceeds the supported range"));
        assert!(top.checked_add(top).is_err());
        assert!(Money::checked_sum([top, Money::new(dec!(1))]).is_err());
        assert_eq!(top.checked_mul(Quantity::ONE).unwrap(), top);
    }

    #[test]
    fn money_serde_roundtrip() {
        let m = Money::new(dec!(150.50));
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }
}
