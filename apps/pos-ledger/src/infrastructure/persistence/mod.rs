//! Persistence adapters.
//!
//! SQLite stores for the menu catalog and the checkout ledger, plus
//! in-memory doubles for tests.

mod database;
mod in_memory;
mod inventory_reader;
mod menu_catalog;
mod order_ledger;

pub use database::{StoreOptions, open_in_memory_pool, open_pool};
pub use in_memory::{InMemoryMenuCatalog, InMemoryOrderLedger};
pub use inventory_reader::SqliteInventoryReader;
pub use menu_catalog::SqliteMenuCatalogStore;
pub use order_ledger::SqliteOrderLedgerStore;
