//! Menu Catalog Repository Trait
//!
//! Defines the persistence abstraction for the menu catalog.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::menu_item::{MenuItem, NewMenuItem};
use crate::error::StoreError;

/// Repository trait for the `menu_items` table.
///
/// Names are not unique here: two catalog rows may share a name, and
/// removal deletes every row with that name.
#[async_trait]
pub trait MenuCatalogRepository: Send + Sync {
    /// Ensure the backing table exists. Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns error if the schema statement fails.
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// All items in insertion order. Rows that cannot be decoded are left out.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_items(&self) -> Result<Vec<MenuItem>, StoreError>;

    /// Insert an item unconditionally and return it with its row id.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    async fn add_item(&self, item: &NewMenuItem) -> Result<MenuItem, StoreError>;

    /// Delete all items whose name matches exactly; returns how many went.
    ///
    /// # Errors
    ///
    /// Returns error if the delete fails. No match is not an error.
    async fn remove_item(&self, name: &str) -> Result<u64, StoreError>;
}
