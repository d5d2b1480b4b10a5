//! SQLite connection pools.
//!
//! Each store owns one pool over its own database file. Pools are small:
//! SQLite serialises writers anyway, and the desktop front end issues one
//! request at a time.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::config::PersistenceConfig;
use crate::error::StoreError;

/// Pool settings shared by the catalog and ledger stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum pooled connections per database file.
    pub max_connections: u32,
    /// How long a writer waits for a competing writer's lock.
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&PersistenceConfig> for StoreOptions {
    fn from(config: &PersistenceConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
        }
    }
}

/// Open (creating if missing) the database file at `path`.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns error if the directory cannot be created or the file cannot be
/// opened as a SQLite database.
pub async fn open_pool(path: &Path, options: StoreOptions) -> Result<SqlitePool, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StoreError::Storage(format!(
                "cannot create database directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let connect = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .busy_timeout(options.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .connect_with(connect)
        .await?;

    info!(
        path = %path.display(),
        max_connections = options.max_connections,
        "SQLite pool opened"
    );
    Ok(pool)
}

/// A private in-memory database that lives as long as the returned pool.
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// pinned to exactly one connection that is never recycled.
///
/// # Errors
///
/// Returns error if the connection cannot be established.
pub async fn open_in_memory_pool() -> Result<SqlitePool, StoreError> {
    let connect = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect)
        .await?;
    Ok(pool)
}
