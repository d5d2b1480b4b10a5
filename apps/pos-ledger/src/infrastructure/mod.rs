//! Infrastructure Layer
//!
//! Adapters that implement the domain repositories and application ports:
//!
//! - **Persistence**: SQLite stores for the menu catalog and checkout ledger
//! - **Assets**: the on-disk picture directory

pub mod assets;
pub mod persistence;

pub use assets::FsImageAssetStore;
pub use persistence::{
    InMemoryMenuCatalog, InMemoryOrderLedger, SqliteInventoryReader, SqliteMenuCatalogStore,
    SqliteOrderLedgerStore, StoreOptions,
};
