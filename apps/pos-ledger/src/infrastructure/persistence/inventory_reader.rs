//! Per-day reporting queries over the ledger database.

use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::database::{StoreOptions, open_pool};
use super::order_ledger::TABLE;
use crate::domain::ledger::{InventoryReader, InventoryRow};
use crate::domain::shared::{ItemName, LEDGER_DATE_FORMAT, Money, Quantity};
use crate::error::StoreError;

/// Read-only view of `orders` filtered by calendar day.
#[derive(Debug, Clone)]
pub struct SqliteInventoryReader {
    pool: SqlitePool,
}

impl SqliteInventoryReader {
    /// Open the ledger database at `path` for reporting.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened.
    pub async fn open(path: &Path, options: StoreOptions) -> Result<Self, StoreError> {
        Ok(Self::with_pool(open_pool(path, options).await?))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryReader for SqliteInventoryReader {
    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<InventoryRow>, StoreError> {
        let day = date.format(LEDGER_DATE_FORMAT).to_string();
        let rows = sqlx::query(
            "SELECT id, item_name, quantity, total FROM orders WHERE date(date) = ? ORDER BY id",
        )
        .bind(day.as_str())
        .fetch_all(&self.pool)
        .await?;

        debug!(day = %day, rows = rows.len(), "Inventory queried");
        rows.iter().map(row_to_inventory).collect()
    }
}

fn row_to_inventory(row: &SqliteRow) -> Result<InventoryRow, StoreError> {
    let id: i64 = row.try_get("id")?;
    let item_name: String = row.try_get("item_name")?;
    let quantity: i64 = row.try_get("quantity")?;
    let total: f64 = row.try_get("total")?;

    let corrupt = |e: &dyn std::fmt::Display| StoreError::corrupt(TABLE, format!("row {id}: {e}"));

    Ok(InventoryRow {
        id,
        item_name: ItemName::new(item_name).map_err(|e| corrupt(&e))?,
        quantity: Quantity::from_i64(quantity).map_err(|e| corrupt(&e))?,
        total: Money::from_f64(total).map_err(|e| corrupt(&e))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::{OrderLedgerRepository, Purchase};
    use crate::domain::shared::LedgerTimestamp;
    use crate::infrastructure::persistence::SqliteOrderLedgerStore;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded() -> SqliteOrderLedgerStore {
        let store = SqliteOrderLedgerStore::open_in_memory().await.unwrap();
        store.init_schema().await.unwrap();

        let sales = [
            ("Tea", "2026-01-19 09:00:00", dec!(20)),
            ("Coffee", "2026-01-19 23:59:59", dec!(100)),
            ("Cake", "2026-01-20 00:00:00", dec!(80)),
        ];
        for (name, at, total) in sales {
            let purchase = Purchase::new(name, 1, Money::new(total), Money::new(total)).unwrap();
            store
                .record_purchase_at(&purchase, LedgerTimestamp::parse(at).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn query_by_date_returns_rows_of_that_day_in_id_order() {
        let store = seeded().await;
        let reader = store.reader();

        let rows = reader.query_by_date(day(2026, 1, 19)).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.item_name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Coffee"]);
        assert!(rows[0].id < rows[1].id);
    }

    #[tokio::test]
    async fn day_without_sales_is_empty() {
        let store = seeded().await;
        let rows = store.reader().query_by_date(day(2026, 2, 1)).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn merged_row_stays_on_its_creation_day() {
        let store = seeded().await;
        let later = Purchase::new("Tea", 2, Money::new(dec!(10)), Money::new(dec!(20))).unwrap();
        store
            .record_purchase_at(&later, LedgerTimestamp::parse("2026-01-20 10:00:00").unwrap())
            .await
            .unwrap();

        let reader = store.reader();
        let first_day = reader.query_by_date(day(2026, 1, 19)).await.unwrap();
        let tea = first_day
            .iter()
            .find(|r| r.item_name.as_str() == "Tea")
            .unwrap();
        assert_eq!(tea.quantity.get(), 3);
        assert_eq!(tea.total.amount(), dec!(40));

        let second_day = reader.query_by_date(day(2026, 1, 20)).await.unwrap();
        assert_eq!(second_day.len(), 1);
        assert_eq!(second_day[0].item_name.as_str(), "Cake");
    }

    #[tokio::test]
    async fn daily_inventory_sums_totals() {
        let store = seeded().await;
        let report = store
            .reader()
            .daily_inventory(day(2026, 1, 19))
            .await
            .unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total_amount.amount(), dec!(120));
    }
}
