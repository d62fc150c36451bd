//! # Storage Error Types
//!
//! Error types for storage and catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / io::Error / serde_json::Error / ValidationError         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ├──► fail-soft Storage API: logged and swallowed                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore: warning Notice  /  ApiError: serialized for the view       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crafts_core::{CoreError, ValidationError};

/// Storage and catalog errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system failure preparing the data directory or reading a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite query or connection failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Schema migration failed when opening the database.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A value could not be encoded or decoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing would exceed the backend's capacity.
    ///
    /// ## When This Occurs
    /// - Memory backend configured with a quota (emulates browser storage limits)
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Key is empty or cannot be mapped to the backend.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The persisted cart was written by a newer schema.
    #[error("Unsupported cart schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    /// The persisted value is not a cart document in any known format.
    #[error("Corrupt record under '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },

    /// Backend cannot be used at all (e.g. storage disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Catalog data failed validation.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CoreError),
}

impl StoreError {
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::CorruptRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Catalog(CoreError::Validation(err))
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Mapping
/// ```text
/// sqlx::Error::PoolTimedOut / PoolClosed  → Unavailable
/// everything else                          → Database
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("database connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::Unavailable("database is closed".to_string()),
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
