//! SQLite menu catalog store (`menu.db`).
//!
//! Rows that do not decode as a [`MenuItem`] (a blank name, a negative or
//! non-finite price) are skipped with a warning when listing, so one bad row
//! written by another tool does not hide the rest of the menu. They can
//! still be deleted by name.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};

use super::database::{StoreOptions, open_in_memory_pool, open_pool};
use crate::domain::catalog::{MenuCatalogRepository, MenuItem, NewMenuItem};
use crate::domain::shared::{ItemName, Money};
use crate::error::StoreError;

const TABLE: &str = "menu_items";

const CREATE_MENU_ITEMS: &str = r"
    CREATE TABLE IF NOT EXISTS menu_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        image_path TEXT
    )
";

/// Menu catalog backed by the `menu_items` table.
#[derive(Debug, Clone)]
pub struct SqliteMenuCatalogStore {
    pool: SqlitePool,
}

impl SqliteMenuCatalogStore {
    /// Open the catalog database at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened.
    pub async fn open(path: &Path, options: StoreOptions) -> Result<Self, StoreError> {
        Ok(Self::with_pool(open_pool(path, options).await?))
    }

    /// A throwaway in-memory catalog.
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
}

#[async_trait]
impl MenuCatalogRepository for SqliteMenuCatalogStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_MENU_ITEMS).execute(&self.pool).await?;
        info!(table = TABLE, "Schema ready");
        Ok(())
    }

    async fn list_items(&self) -> Result<Vec<MenuItem>, StoreError> {
        let rows = sqlx::query("SELECT id, name, price, image_path FROM menu_items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            match row_to_menu_item(row) {
                Ok(item) => items.push(item),
                Err(e @ StoreError::Corrupt { .. }) => {
                    warn!(error = %e, "Skipping unreadable menu row");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(items)
    }

    async fn add_item(&self, item: &NewMenuItem) -> Result<MenuItem, StoreError> {
        let result =
            sqlx::query("INSERT INTO menu_items (name, price, image_path) VALUES (?, ?, ?)")
                .bind(item.name().as_str())
                .bind(item.price().to_f64())
                .bind(item.image_path())
                .execute(&self.pool)
                .await?;

        let id = result.last_insert_rowid();
        debug!(id, name = %item.name(), price = %item.price(), "Menu item added");
        Ok(item.clone().into_menu_item(id))
    }

    async fn remove_item(&self, name: &str) -> Result<u64, StoreError> {
        let removed = sqlx::query("DELETE FROM menu_items WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!(name, removed, "Menu items removed");
        Ok(removed)
    }
}

fn row_to_menu_item(row: &SqliteRow) -> Result<MenuItem, StoreError> {
    let id: i64 = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let price: f64 = row.try_get("price")?;
    let image_path: Option<String> = row.try_get("image_path")?;

    Ok(MenuItem {
        id,
        name: ItemName::new(name)
            .map_err(|e| StoreError::corrupt(TABLE, format!("row {id}: {e}")))?,
        price: Money::from_f64(price)
            .and_then(|p| p.ensure_non_negative("price"))
            .map_err(|e| StoreError::corrupt(TABLE, format!("row {id}: {e}")))?,
        image_path,
    })
}
