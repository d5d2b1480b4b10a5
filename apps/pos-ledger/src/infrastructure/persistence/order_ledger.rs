//! SQLite checkout ledger store (`inventory.db`).
//!
//! Writes go through a short transaction that tries to grow the existing row
//! for the item first and inserts only when none was touched. Because the
//! `UPDATE` takes SQLite's write lock before anything is read, two concurrent
//! checkouts of the same new item cannot both take the insert branch.
//!
//! The merge only applies while the row's quantity fits in [`Quantity::MAX`]
//! and its total stays readable as [`Money`]; past that the purchase is
//! rejected as invalid and the row is left as it was.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument};

use super::database::{StoreOptions, open_in_memory_pool, open_pool};
use super::inventory_reader::SqliteInventoryReader;
use crate::domain::ledger::{LedgerEntry, OrderLedgerRepository, Purchase};
use crate::domain::shared::{DomainError, ItemName, LedgerTimestamp, Money, Quantity};
use crate::error::StoreError;

pub(super) const TABLE: &str = "orders";

const CREATE_ORDERS: &str = r"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        item_name TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        price REAL NOT NULL,
        total REAL NOT NULL,
        date TEXT NOT NULL
    )
";

const MERGE_INTO_EXISTING: &str = r"
    UPDATE orders
    SET quantity = quantity + ?, total = total + ?
    WHERE id = (SELECT id FROM orders WHERE item_name = ? ORDER BY id LIMIT 1)
      AND quantity + ? <= ?
      AND total + ? <= ?
";

const ROW_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM orders WHERE item_name = ?)";

// Largest REAL total that still decodes as a Decimal.
const MAX_STORED_TOTAL: f64 = 7.9e28;

const INSERT_ORDER: &str =
    "INSERT INTO orders (item_name, quantity, price, total, date) VALUES (?, ?, ?, ?, ?)";

/// What a single merge did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeOutcome {
    Merged,
    Inserted,
}

/// Checkout ledger backed by the `orders` table.
#[derive(Debug, Clone)]
pub struct SqliteOrderLedgerStore {
    pool: SqlitePool,
}

impl SqliteOrderLedgerStore {
    /// Open the ledger database at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened.
    pub async fn open(path: &Path, options: StoreOptions) -> Result<Self, StoreError> {
        Ok(Self::with_pool(open_pool(path, options).await?))
    }

    /// A throwaway in-memory ledger.
    ///
    /// # Errors
    ///
    /// Returns error if the connection cannot be established.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::with_pool(open_in_memory_pool().await?))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// A reporting view over the same database.
    #[must_use]
    pub fn reader(&self) -> SqliteInventoryReader {
        SqliteInventoryReader::with_pool(self.pool.clone())
    }
}

#[async_trait]
impl OrderLedgerRepository for SqliteOrderLedgerStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ORDERS).execute(&self.pool).await?;
        info!(table = TABLE, "Schema ready");
        Ok(())
    }

    #[instrument(skip(self, purchase), fields(item = %purchase.item_name()))]
    async fn record_purchase_at(
        &self,
        purchase: &Purchase,
        at: LedgerTimestamp,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let outcome = merge_purchase(&mut tx, purchase, at).await?;
        tx.commit().await?;

        debug!(
            ?outcome,
            quantity = purchase.quantity().get(),
            line_total = %purchase.line_total(),
            "Purchase recorded"
        );
        Ok(())
    }

    #[instrument(skip(self, purchases), fields(lines = purchases.len()))]
    async fn record_purchases(
        &self,
        purchases: &[Purchase],
        at: LedgerTimestamp,
    ) -> Result<(), StoreError> {
        if purchases.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0usize;
        for purchase in purchases {
            if merge_purchase(&mut tx, purchase, at).await? == MergeOutcome::Inserted {
                inserted += 1;
            }
        }
        tx.commit().await?;

        debug!(
            inserted,
            merged = purchases.len() - inserted,
            "Purchases recorded"
        );
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, item_name, quantity, price, total, date FROM orders \
             ORDER BY date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_entry).collect()
    }
}

async fn merge_purchase(
    conn: &mut SqliteConnection,
    purchase: &Purchase,
    at: LedgerTimestamp,
) -> Result<MergeOutcome, StoreError> {
    let quantity = i64::from(purchase.quantity());
    let line_total = purchase.line_total().to_f64();
    let updated = sqlx::query(MERGE_INTO_EXISTING)
        .bind(quantity)
        .bind(line_total)
        .bind(purchase.item_name().as_str())
        .bind(quantity)
        .bind(i64::from(Quantity::MAX))
        .bind(line_total)
        .bind(MAX_STORED_TOTAL)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if updated > 0 {
        return Ok(MergeOutcome::Merged);
    }

    let exists: i64 = sqlx::query_scalar(ROW_EXISTS)
        .bind(purchase.item_name().as_str())
        .fetch_one(&mut *conn)
        .await?;
    if exists != 0 {
        return Err(DomainError::invalid(
            "quantity",
            format!(
                "merging into '{}' would exceed the ledger row's range",
                purchase.item_name()
            ),
        )
        .into());
    }

    sqlx::query(INSERT_ORDER)
        .bind(purchase.item_name().as_str())
        .bind(i64::from(purchase.quantity()))
        .bind(purchase.unit_price().to_f64())
        .bind(purchase.line_total().to_f64())
        .bind(at.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(MergeOutcome::Inserted)
}

fn row_to_entry(row: &SqliteRow) -> Result<LedgerEntry, StoreError> {
    let id: i64 = row.try_get("id")?;
    let item_name: String = row.try_get("item_name")?;
    let quantity: i64 = row.try_get("quantity")?;
    let price: f64 = row.try_get("price")?;
    let total: f64 = row.try_get("total")?;
    let date: String = row.try_get("date")?;

    let corrupt = |e: &dyn std::fmt::Display| StoreError::corrupt(TABLE, format!("row {id}: {e}"));

    Ok(LedgerEntry {
        id,
        item_name: ItemName::new(item_name).map_err(|e| corrupt(&e))?,
        quantity: Quantity::from_i64(quantity).map_err(|e| corrupt(&e))?,
        price: Money::from_f64(price).map_err(|e| corrupt(&e))?,
        total: Money::from_f64(total).map_err(|e| corrupt(&e))?,
        date: LedgerTimestamp::parse(&date).map_err(|e| corrupt(&e))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::InventoryReader;
    use rust_decimal_macros::dec;

    async fn store() -> SqliteOrderLedgerStore {
        let store = SqliteOrderLedgerStore::open_in_memory().await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    fn ts(s: &str) -> LedgerTimestamp {
        LedgerTimestamp::parse(s).unwrap()
    }

    fn purchase(name: &str, quantity: u32, unit: Money) -> Purchase {
        let total = unit.checked_mul(Quantity::new(quantity).unwrap()).unwrap();
        Purchase::new(name, quantity, unit, total).unwrap()
    }

    #[tokio::test]
    async fn first_purchase_inserts_row() {
        let store = store().await;
        store
            .record_purchase_at(
                &purchase("Coffee", 2, Money::new(dec!(50))),
                ts("2026-01-19 09:00:00"),
            )
            .await
            .unwrap();

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name.as_str(), "Coffee");
        assert_eq!(rows[0].quantity.get(), 2);
        assert_eq!(rows[0].price.amount(), dec!(50));
        assert_eq!(rows[0].total.amount(), dec!(100));
        assert_eq!(rows[0].date.to_string(), "2026-01-19 09:00:00");
    }

    #[tokio::test]
    async fn repeat_purchase_merges_and_keeps_price_and_date() {
        let store = store().await;
        store
            .record_purchase_at(
                &purchase("Tea", 2, Money::new(dec!(10))),
                ts("2026-01-19 09:00:00"),
            )
            .await
            .unwrap();
        store
            .record_purchase_at(
                &purchase("Tea", 3, Money::new(dec!(12))),
                ts("2026-01-20 15:00:00"),
            )
            .await
            .unwrap();

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity.get(), 5);
        assert_eq!(rows[0].total.amount(), dec!(56));
        assert_eq!(rows[0].price.amount(), dec!(10));
        assert_eq!(rows[0].date.to_string(), "2026-01-19 09:00:00");
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let store = store().await;
        store
            .record_purchase_at(
                &purchase("Tea", 1, Money::new(dec!(10))),
                ts("2026-01-19 09:00:00"),
            )
            .await
            .unwrap();
        store
            .record_purchase_at(
                &purchase("Coffee", 1, Money::new(dec!(50))),
                ts("2026-01-20 09:00:00"),
            )
            .await
            .unwrap();
        store
            .record_purchase_at(
                &purchase("Cake", 1, Money::new(dec!(80))),
                ts("2026-01-20 09:00:00"),
            )
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.item_name.into_inner())
            .collect();
        assert_eq!(names, vec!["Cake", "Coffee", "Tea"]);
    }

    #[tokio::test]
    async fn batch_merges_within_itself() {
        let store = store().await;
        let at = ts("2026-01-19 09:00:00");
        store
            .record_purchases(
                &[
                    purchase("Tea", 1, Money::new(dec!(10))),
                    purchase("Coffee", 2, Money::new(dec!(50))),
                    purchase("Tea", 2, Money::new(dec!(10))),
                ],
                at,
            )
            .await
            .unwrap();

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        let tea = rows.iter().find(|r| r.item_name.as_str() == "Tea").unwrap();
        assert_eq!(tea.quantity.get(), 3);
        assert_eq!(tea.total.amount(), dec!(30));
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let store = store().await;
        store
            .record_purchases(&[], ts("2026-01-19 09:00:00"))
            .await
            .unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_is_all_or_nothing() {
        let store = store().await;
        // Make every insert fail once the table has one row.
        sqlx::query(
            "CREATE TRIGGER one_row_only BEFORE INSERT ON orders \
             WHEN (SELECT COUNT(*) FROM orders) >= 1 \
             BEGIN SELECT RAISE(ABORT, 'full'); END",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let err = store
            .record_purchases(
                &[
                    purchase("Tea", 1, Money::new(dec!(10))),
                    purchase("Coffee", 1, Money::new(dec!(50))),
                ],
                ts("2026-01-19 09:00:00"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Storage(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn names_are_case_sensitive() {
        let store = store().await;
        let at = ts("2026-01-19 09:00:00");
        store
            .record_purchase_at(&purchase("Tea", 1, Money::new(dec!(10))), at)
            .await
            .unwrap();
        store
            .record_purchase_at(&purchase("tea", 1, Money::new(dec!(10))), at)
            .await
            .unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_purchases_do_not_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteOrderLedgerStore::open(
            &dir.path().join("inventory.db"),
            StoreOptions::default(),
        )
        .await
        .unwrap();
        store.init_schema().await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .record_purchase(&purchase("Tea", 1, Money::new(dec!(10))))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity.get(), 16);
        assert_eq!(rows[0].total.amount(), dec!(160));
    }

    #[tokio::test]
    async fn merge_past_max_quantity_is_rejected_and_ledger_stays_readable() {
        let store = store().await;
        let at = ts("2026-01-19 09:00:00");
        store
            .record_purchase_at(
                &Purchase::new("Tea", u32::MAX, Money::ZERO, Money::ZERO).unwrap(),
                at,
            )
            .await
            .unwrap();

        let err = store
            .record_purchase_at(&purchase("Tea", 1, Money::new(dec!(10))), at)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = store
            .record_purchases(
                &[
                    purchase("Cake", 1, Money::new(dec!(80))),
                    purchase("Tea", 1, Money::new(dec!(10))),
                ],
                at,
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, Quantity::MAX);
        assert_eq!(rows[0].total, Money::ZERO);
        assert_eq!(store.reader().query_by_date(at.date()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_row_is_corrupt() {
        let store = store().await;
        sqlx::query(
            "INSERT INTO orders (item_name, quantity, price, total, date) \
             VALUES ('Tea', 0, 10.0, 0.0, '2026-01-19 09:00:00')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { table: "orders", .. }));
    }
}
