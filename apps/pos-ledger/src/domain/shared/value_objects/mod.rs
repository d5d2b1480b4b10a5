//! Shared Value Objects
//!
//! Immutable domain types used by the catalog, the cart and the ledger.
//! Value objects are compared by value, not identity.

mod item_name;
mod money;
mod quantity;
mod timestamp;

pub use item_name::ItemName;
pub use money::Money;
pub use quantity::Quantity;
pub use timestamp::{
    LEDGER_DATE_FORMAT, LEDGER_TIMESTAMP_FORMAT, LedgerTimestamp, parse_ledger_date,
};
