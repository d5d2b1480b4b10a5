// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::cast_possible_wrap
    )
)]

//! POS Ledger - Core Library
//!
//! Menu catalog, order cart and checkout ledger for a small counter-service
//! point-of-sale system.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (entities, value objects, repository traits)
//!   - `catalog`: Menu items and the `MenuCatalogRepository` port
//!   - `cart`: The in-memory order being built at the counter
//!   - `ledger`: Per-item checkout rows, purchases and the daily inventory view
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `ImageAssetPort` for menu pictures
//!   - `use_cases`: `ManageMenu`, `Checkout`, `ViewInventory`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: SQLite stores (`menu.db`, `inventory.db`) and in-memory doubles
//!   - `assets`: The on-disk picture directory

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no storage dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Storage error type.
pub mod error;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{AssetError, ImageAssetPort, StoredImage};
pub use application::use_cases::{
    CheckoutError, CheckoutReceipt, CheckoutUseCase, ManageMenuUseCase, MenuError,
    ViewInventoryUseCase,
};
pub use domain::cart::{Cart, CartLine};
pub use domain::catalog::{MenuCatalogRepository, MenuItem, NewMenuItem};
pub use domain::ledger::{
    DailyInventory, InventoryReader, InventoryRow, LedgerEntry, OrderLedgerRepository, Purchase,
};
pub use domain::shared::{DomainError, ItemName, LedgerTimestamp, Money, Quantity};
pub use error::StoreError;
pub use infrastructure::{
    FsImageAssetStore, InMemoryMenuCatalog, InMemoryOrderLedger, SqliteInventoryReader,
    SqliteMenuCatalogStore, SqliteOrderLedgerStore, StoreOptions,
};
