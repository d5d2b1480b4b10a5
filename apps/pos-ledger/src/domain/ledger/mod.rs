//! Checkout Ledger Bounded Context
//!
//! The persisted, per-item-name aggregate of everything ever checked out.
//!
//! # Key Concepts
//!
//! - **Merge by name**: one row per item name; repeat purchases add to it
//! - **First-purchase stamp**: a row keeps the price and date of its first insert
//! - **Inventory view**: rows filtered by the calendar day they were created

pub mod entry;
pub mod inventory;
pub mod repository;

pub use entry::{LedgerEntry, Purchase};
pub use inventory::{DailyInventory, InventoryRow};
pub use repository::{InventoryReader, OrderLedgerRepository};
