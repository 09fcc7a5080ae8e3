//! The store handle.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use crate::error::{Result, StoreError};

/// Table that keeps the descriptions supplied at table creation.
pub const CATALOG_TABLE: &str = "_oxide_tables";

/// SQL to create the description catalog.
pub const CREATE_CATALOG_SQL: &str = r"
CREATE TABLE IF NOT EXISTS _oxide_tables (
    name TEXT PRIMARY KEY COLLATE NOCASE,
    description TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
";

/// Grants access to [`TableStore::raw_query`].
///
/// Raw SQL bypasses every identifier and value check, so it is a separate
/// capability from the structured operations. Only the process entry point
/// should mint one, and only when raw SQL is enabled in its configuration.
#[derive(Debug, Clone, Copy)]
pub struct RawSqlCapability {
    _private: (),
}

impl RawSqlCapability {
    /// Mints the capability.
    #[must_use]
    pub const fn grant() -> Self {
        Self { _private: () }
    }
}

/// Handle to the table store.
///
/// Cheap to clone; all clones share one connection pool. Every call goes to
/// SQLite: schema information is never cached.
#[derive(Debug, Clone)]
pub struct TableStore {
    pub(crate) pool: SqlitePool,
}

impl TableStore {
    /// Wraps an existing pool. Call [`TableStore::init`] before use.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url` and initialises the
    /// description catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if the URL is invalid or the
    /// database cannot be opened.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(StoreError::execution("parse database url"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(StoreError::execution("open database"))?;

        let store = Self::new(pool);
        store.init().await?;
        info!(url = %url, max_connections, "Table store ready");
        Ok(store)
    }

    /// Ensures the description catalog exists. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if the catalog cannot be created.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_CATALOG_SQL)
            .execute(&self.pool)
            .await
            .map_err(StoreError::execution("create description catalog"))?;
        Ok(())
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs `PRAGMA integrity_check`; true when SQLite reports `ok`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Execution`] if the pragma cannot run.
    pub async fn health_check(&self) -> Result<bool> {
        let (status,): (String,) = sqlx::query_as("PRAGMA integrity_check")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::execution("run integrity check"))?;

        if status != "ok" {
            warn!(status = %status, "Integrity check failed");
        }
        Ok(status == "ok")
    }

    /// Closes every connection. Pending and later calls fail.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Table store closed");
    }
}
