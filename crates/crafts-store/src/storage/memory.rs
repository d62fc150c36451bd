//! In-memory backend.
//!
//! An optional quota bounds the total bytes of keys plus values, the way a
//! browser caps local storage. A write that would cross it fails and leaves
//! the previous value in place.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// A store holding at most `quota` bytes of keys and values.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStore {
            entries: Mutex::default(),
            quota: Some(quota),
        }
    }

    /// Bytes currently used.
    pub fn used_bytes(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        usage(&entries)
    }
}

fn usage(entries: &HashMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(quota) = self.quota {
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = usage(&entries) - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_write_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.read("a").await.unwrap(), None);

        store.write("a", "1").await.unwrap();
        assert_eq!(store.read("a").await.unwrap().as_deref(), Some("1"));

        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        assert_eq!(store.read("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quota_counts_replacement() {
        let store = MemoryStore::with_quota(10);
        store.write("k", "123456789").await.unwrap();
        assert_eq!(store.used_bytes(), 10);

        // Replacing the same key reuses its space.
        store.write("k", "987654321").await.unwrap();

        let err = store.write("j", "x").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                needed: 12,
                quota: 10
            }
        ));
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("987654321"));
    }
}
