//! # SQLite Backend
//!
//! Keys and values live in one `kv` table inside a SQLite database.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteConfig::new(<data dir>/storefront.db)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::open(config).await                                       │
//! │       ├── create the parent directory                                  │
//! │       ├── connect: WAL journal, NORMAL synchronous                     │
//! │       └── run embedded migrations (migrations/sqlite/*.sql)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read   SELECT value FROM kv WHERE key = ?                             │
//! │  write  INSERT ... ON CONFLICT(key) DO UPDATE                          │
//! │  delete DELETE FROM kv WHERE key = ?                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A single upsert replaces a value atomically, so a crash mid-write leaves
//! the previous value readable.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStore;

/// File name of the storefront database inside the data directory.
pub const DATABASE_FILE: &str = "storefront.db";

/// Embedded migrations from `migrations/sqlite`.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations/sqlite");

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for [`SqliteStore`].
///
/// ## Example
/// ```rust,ignore
/// let config = SqliteConfig::new("/var/lib/crafts/storefront.db").max_connections(2);
/// let store = SqliteStore::open(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file, `None` for a private in-memory database.
    pub database_path: Option<PathBuf>,

    /// Default: 4. The cart writes through one key, so a small pool is plenty.
    pub max_connections: u32,

    /// Default: 1
    pub min_connections: u32,

    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl SqliteConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteConfig {
            database_path: Some(path.into()),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// `<dir>/storefront.db`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        SqliteConfig::new(dir.as_ref().join(DATABASE_FILE))
    }

    /// An in-memory database (for testing).
    pub fn in_memory() -> Self {
        SqliteConfig {
            database_path: None,
            // An in-memory database lives on a single connection
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects, creating the database file if needed, and applies pending
    /// migrations.
    pub async fn open(config: SqliteConfig) -> StoreResult<Self> {
        let connect_options = match &config.database_path {
            Some(path) => {
                prepare_parent(path)?;
                info!(path = %path.display(), "Opening SQLite storage");

                SqliteConnectOptions::new()
                    .filename(path)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .create_if_missing(true)
            }
            None => {
                debug!("Opening in-memory SQLite storage");
                SqliteConnectOptions::from_str("sqlite::memory:")?
            }
        };

        // Idle connections are never reaped for an in-memory database, or
        // its contents would go with them.
        let idle_timeout = config.database_path.as_ref().map(|_| config.idle_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(idle_timeout)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = SqliteStore { pool };
        store.run_migrations().await?;

        info!(max_connections = config.max_connections, "SQLite storage ready");
        Ok(store)
    }

    /// Opens a private in-memory database.
    pub async fn in_memory() -> StoreResult<Self> {
        SqliteStore::open(SqliteConfig::in_memory()).await
    }

    /// Applies pending migrations. Safe to run more than once.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        debug!("Checking for pending migrations");
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Number of stored keys.
    pub async fn len(&self) -> StoreResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    pub async fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Closes the pool. Later calls fail with [`StoreError::Unavailable`].
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Creates the directory that will hold the database file.
fn prepare_parent(path: &Path) -> StoreResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    if parent.exists() && !parent.is_dir() {
        return Err(StoreError::Unavailable(format!(
            "{} is not a directory",
            parent.display()
        )));
    }

    std::fs::create_dir_all(parent)?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
