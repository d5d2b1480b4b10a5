//! Storage error type shared by every repository port.
//!
//! | Variant | Meaning | Caller action |
//! |---------|---------|---------------|
//! | `Validation` | empty name, bad or negative price, quantity < 1 | fix input; nothing was written |
//! | `Storage` | disk or connection failure | show the error, keep in-memory state, retry |
//! | `Corrupt` | a stored row cannot be decoded | inspect the database file |
//!
//! Finding nothing (removing an unknown item, a day without sales) is not an
//! error: those operations return zero or an empty sequence.

use thiserror::Error;

use crate::domain::shared::DomainError;

/// Errors returned by the catalog, ledger and inventory stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before any write was attempted.
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    /// Underlying database failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored row violates the data model.
    #[error("Corrupt row in '{table}': {message}")]
    Corrupt {
        /// Table the row was read from.
        table: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl StoreError {
    /// Returns true for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub(crate) fn corrupt(table: &'static str, message: impl Into<String>) -> Self {
        Self::Corrupt {
            table,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
