//! Ledger Repository Traits
//!
//! Persistence abstractions for the checkout ledger and its read model.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::entry::{LedgerEntry, Purchase};
use super::inventory::{DailyInventory, InventoryRow};
use crate::domain::shared::LedgerTimestamp;
use crate::error::StoreError;

/// Repository trait for the `orders` table.
///
/// Implementations keep at most one row per item name: recording a purchase
/// for a name that already has a row adds to its quantity and total and
/// leaves its price and date alone. The merge must be atomic with respect to
/// other callers of the same store.
#[async_trait]
pub trait OrderLedgerRepository: Send + Sync {
    /// Ensure the backing table exists. Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns error if the schema statement fails.
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// Merge a purchase into the ledger, stamping new rows with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the merged row would exceed
    /// [`Quantity::MAX`](crate::domain::shared::Quantity::MAX) or the money
    /// range, or a storage error if the write fails. Nothing is written in
    /// either case.
    async fn record_purchase_at(
        &self,
        purchase: &Purchase,
        at: LedgerTimestamp,
    ) -> Result<(), StoreError>;

    /// Merge several purchases as one unit: all of them land or none do.
    ///
    /// # Errors
    ///
    /// Returns error if any write fails.
    async fn record_purchases(
        &self,
        purchases: &[Purchase],
        at: LedgerTimestamp,
    ) -> Result<(), StoreError>;

    /// All rows, newest first by creation date.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or a row cannot be decoded.
    async fn list_all(&self) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Merge a purchase into the ledger using the current local time.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    async fn record_purchase(&self, purchase: &Purchase) -> Result<(), StoreError> {
        self.record_purchase_at(purchase, LedgerTimestamp::now())
            .await
    }
}

/// Read-only, per-day view over the ledger used for reporting.
#[async_trait]
pub trait InventoryReader: Send + Sync {
    /// Rows whose creation date falls on `date`, in id order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails. No match yields an empty vector.
    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<InventoryRow>, StoreError>;

    /// The rows for `date` together with their summed total.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the day's total is out of range.
    async fn daily_inventory(&self, date: NaiveDate) -> Result<DailyInventory, StoreError> {
        let rows = self.query_by_date(date).await?;
        Ok(DailyInventory::from_rows(date, rows)?)
    }
}
