//! Quantity value object for cart lines and ledger rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A whole number of units, always at least one.
///
/// Zero-quantity lines do not exist: a cart line that would drop to zero is
/// removed instead, and the ledger never stores an empty purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// The largest quantity a cart line or ledger row can hold.
    pub const MAX: Self = Self(u32::MAX);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns error if `units` is zero.
    pub fn new(units: u32) -> Result<Self, DomainError> {
        if units == 0 {
            return Err(DomainError::invalid("quantity", "must be at least 1"));
        }
        Ok(Self(units))
    }

    /// Create a quantity from a stored `INTEGER` column.
    ///
    /// # Errors
    ///
    /// Returns error if the value is below one or above [`Quantity::MAX`].
    pub fn from_i64(units: i64) -> Result<Self, DomainError> {
        u32::try_from(units)
            .ok()
            .filter(|u| *u > 0)
            .map(Self)
            .ok_or_else(|| {
                DomainError::invalid(
                    "quantity",
                    format!("{units} is outside 1..={}", Self::MAX.0),
                )
            })
    }

    /// Number of units.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Sum of two quantities.
    ///
    /// # Errors
    ///
    /// Returns error if the sum exceeds [`Quantity::MAX`].
    pub fn checked_add(self, rhs: Self) -> Result<Self, DomainError> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(|| {
            DomainError::invalid("quantity", format!("{self} + {rhs} exceeds {}", Self::MAX.0))
        })
    }

    /// One fewer unit, or `None` when this is the last one.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl From<Quantity> for i64 {
    fn from(value: Quantity) -> Self {
        Self::from(value.0)
    }
}
