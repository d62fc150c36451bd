//! # Storage Adapter
//!
//! Key/value persistence behind a pluggable backend.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storage Adapter                                  │
//! │                                                                         │
//! │  Storage (this module)                                                 │
//! │  ├── try_get / try_set / try_remove   strict: StoreResult<_>           │
//! │  └── get / set / remove               fail-soft: Option / bool         │
//! │       │  JSON encode/decode, key checks, logging                       │
//! │       ▼                                                                 │
//! │  dyn KeyValueStore (async)                                             │
//! │  ├── SqliteStore   kv table in a WAL-mode SQLite file                  │
//! │  └── MemoryStore   HashMap, optional byte quota                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The fail-soft API never returns an error: failures are logged with
//! `tracing::error!` and reported as `None` / `false`.

pub mod memory;
pub mod sqlite;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{StoreError, StoreResult};

pub use memory::MemoryStore;
pub use sqlite::{SqliteConfig, SqliteStore, DATABASE_FILE};

// =============================================================================
// Backend Trait
// =============================================================================

/// A raw string key/value backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Returns the stored value, `None` when the key is absent.
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores a value, replacing any previous one.
    async fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes a key. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Short name for logs.
    fn backend_name(&self) -> &'static str;
}

// =============================================================================
// Storage
// =============================================================================

/// JSON storage over a shared backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Storage {
            backend: Arc::new(backend),
        }
    }

    /// Unbounded in-memory storage.
    pub fn memory() -> Self {
        Storage::new(MemoryStore::new())
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    // -------------------------------------------------------------------------
    // Strict API
    // -------------------------------------------------------------------------

    /// Reads and decodes a value.
    pub async fn try_get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        validate_key(key)?;

        match self.backend.read(key).await? {
            Some(raw) => {
                debug!(key = %key, bytes = raw.len(), "Storage read");
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    /// Encodes and writes a value.
    pub async fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        validate_key(key)?;

        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw).await?;
        debug!(key = %key, bytes = raw.len(), backend = self.backend_name(), "Storage write");
        Ok(())
    }

    pub async fn try_remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.backend.delete(key).await
    }

    // -------------------------------------------------------------------------
    // Fail-soft API
    // -------------------------------------------------------------------------

    /// Like [`Storage::try_get`], but any failure reads as `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_get(key).await.unwrap_or_else(|e| {
            error!(key = %key, error = %e, "Error reading from storage");
            None
        })
    }

    /// Like [`Storage::try_set`]. Returns false on failure.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value).await {
            Ok(()) => true,
            Err(e) => {
                error!(key = %key, error = %e, "Error writing to storage");
                false
            }
        }
    }

    /// Like [`Storage::try_remove`]. Returns false on failure.
    pub async fn remove(&self, key: &str) -> bool {
        match self.try_remove(key).await {
            Ok(()) => true,
            Err(e) => {
                error!(key = %key, error = %e, "Error removing from storage");
                false
            }
        }
    }
}

/// Checks a storage key: non-empty, `[A-Za-z0-9._-]` only, no leading dot.
///
/// Every backend accepts every key that passes, so config validation can
/// reject a bad cart key before anything is written.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if !valid {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_strict_roundtrip() {
        let storage = Storage::memory();
        let prefs = Prefs {
            theme: "blue".to_string(),
            count: 3,
        };

        storage.try_set("prefs", &prefs).await.unwrap();
        assert_eq!(storage.try_get::<Prefs>("prefs").await.unwrap(), Some(prefs));

        storage.try_remove("prefs").await.unwrap();
        assert_eq!(storage.try_get::<Prefs>("prefs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fail_soft_swallows_errors() {
        let storage = Storage::new(MemoryStore::with_quota(8));

        assert!(!storage.set("key", &"a value longer than the quota").await);
        assert!(storage.get::<String>("key").await.is_none());

        // Undecodable values read as absent.
        assert!(storage.set("n", &"x").await);
        assert!(storage.get::<u32>("n").await.is_none());
        assert!(matches!(
            storage.try_get::<u32>("n").await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_keys_rejected() {
        let storage = Storage::memory();
        assert!(matches!(
            storage.try_set(" ", &1).await,
            Err(StoreError::InvalidKey(_))
        ));
        assert!(!storage.remove("").await);

        for key in ["my cart", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
        assert!(validate_key("dannys-crafts-cart").is_ok());
        assert!(validate_key("cart_v2.backup").is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_backend() {
        let storage = Storage::memory();
        let other = storage.clone();

        assert!(storage.set("shared", &42).await);
        assert_eq!(other.get::<u32>("shared").await, Some(42));
    }
}
