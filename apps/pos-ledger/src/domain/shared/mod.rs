//! Shared Domain Types
//!
//! Value objects and errors shared across bounded contexts.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{
    ItemName, LEDGER_DATE_FORMAT, LEDGER_TIMESTAMP_FORMAT, LedgerTimestamp, Money, Quantity,
    parse_ledger_date,
};
