//! In-memory catalog and ledger stores for testing.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::domain::catalog::{MenuCatalogRepository, MenuItem, NewMenuItem};
use crate::domain::ledger::{
    InventoryReader, InventoryRow, LedgerEntry, OrderLedgerRepository, Purchase,
};
use crate::domain::shared::LedgerTimestamp;
use crate::error::StoreError;

/// In-memory implementation of `MenuCatalogRepository`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryMenuCatalog {
    state: RwLock<CatalogState>,
}

#[derive(Debug, Default)]
struct CatalogState {
    next_id: i64,
    items: Vec<MenuItem>,
}

impl InMemoryMenuCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }
}

#[async_trait]
impl MenuCatalogRepository for InMemoryMenuCatalog {
    async fn init_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_items(&self) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self.state.read().items.clone())
    }

    async fn add_item(&self, item: &NewMenuItem) -> Result<MenuItem, StoreError> {
        let mut state = self.state.write();
        state.next_id += 1;
        let added = item.clone().into_menu_item(state.next_id);
        state.items.push(added.clone());
        Ok(added)
    }

    async fn remove_item(&self, name: &str) -> Result<u64, StoreError> {
        let mut state = self.state.write();
        let before = state.items.len();
        state.items.retain(|i| i.name.as_str() != name);
        Ok((before - state.items.len()) as u64)
    }
}

/// In-memory implementation of `OrderLedgerRepository` and `InventoryReader`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryOrderLedger {
    state: RwLock<LedgerState>,
}

#[derive(Debug, Clone, Default)]
struct LedgerState {
    next_id: i64,
    entries: Vec<LedgerEntry>,
}

impl LedgerState {
    fn merge(&mut self, purchase: &Purchase, at: LedgerTimestamp) -> Result<(), StoreError> {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.item_name == *purchase.item_name())
        {
            entry.absorb(purchase)?;
        } else {
            self.next_id += 1;
            self.entries
                .push(purchase.clone().into_entry(self.next_id, at));
        }
        Ok(())
    }
}

impl InMemoryOrderLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of rows in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Check if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }
}

#[async_trait]
impl OrderLedgerRepository for InMemoryOrderLedger {
    async fn init_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn record_purchase_at(
        &self,
        purchase: &Purchase,
        at: LedgerTimestamp,
    ) -> Result<(), StoreError> {
        self.state.write().merge(purchase, at)
    }

    async fn record_purchases(
        &self,
        purchases: &[Purchase],
        at: LedgerTimestamp,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write();
        let mut staged = state.clone();
        for purchase in purchases {
            staged.merge(purchase, at)?;
        }
        *state = staged;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut entries = self.state.read().entries.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(entries)
    }
}

#[async_trait]
impl InventoryReader for InMemoryOrderLedger {
    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<InventoryRow>, StoreError> {
        let state = self.state.read();
        Ok(state
            .entries
            .iter()
            .filter(|e| e.date.date() == date)
            .map(|e| InventoryRow {
                id: e.id,
                item_name: e.item_name.clone(),
                quantity: e.quantity,
                total: e.total,
            })
            .collect())
    }
}
