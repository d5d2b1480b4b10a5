//! SQLite store locations and pool sizing.

use serde::{Deserialize, Serialize};

/// Persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Menu catalog database file.
    #[serde(default = "default_menu_db_path")]
    pub menu_db_path: String,
    /// Checkout ledger database file.
    #[serde(default = "default_orders_db_path")]
    pub orders_db_path: String,
    /// Pooled connections per database file.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long a write waits on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            menu_db_path: default_menu_db_path(),
            orders_db_path: default_orders_db_path(),
            max_connections: default_max_connections(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_menu_db_path() -> String {
    "./data/menu.db".to_string()
}

fn default_orders_db_path() -> String {
    "./data/inventory.db".to_string()
}

const fn default_max_connections() -> u32 {
    4
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}
