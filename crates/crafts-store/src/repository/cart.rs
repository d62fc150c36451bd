//! # Cart Repository
//!
//! Persists the whole cart under one storage key.
//!
//! ```text
//!   save(cart)  ──►  CartDocument v2  ──►  Storage::try_set(key)
//!   load()      ◄──  upgrade(any version)  ◄──  Storage::try_get(key)
//!                    └── Cart::from_lines: drop qty ≤ 0, merge duplicate ids
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use crafts_core::Cart;

use crate::error::StoreResult;
use crate::migrations::{self, CartDocument};
use crate::storage::Storage;

/// Default storage key for the cart blob.
pub const DEFAULT_CART_KEY: &str = "dannys-crafts-cart";

#[derive(Debug, Clone)]
pub struct CartRepository {
    storage: Storage,
    key: String,
}

impl CartRepository {
    pub fn new(storage: Storage, key: impl Into<String>) -> Self {
        CartRepository {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the persisted cart. An absent key is an empty cart.
    ///
    /// Lines are repaired on the way in, so the returned cart always holds
    /// the cart invariants even if another writer stored bad data.
    pub async fn load(&self) -> StoreResult<Cart> {
        let Some(value) = self.storage.try_get::<Value>(&self.key).await? else {
            debug!(key = %self.key, "No persisted cart");
            return Ok(Cart::new());
        };

        let document = migrations::upgrade(&self.key, value)?;
        let stored = document.items.len();
        let cart = Cart::from_lines(document.items);

        if cart.line_count() != stored {
            warn!(
                key = %self.key,
                stored,
                kept = cart.line_count(),
                "Repaired persisted cart lines"
            );
        }

        debug!(key = %self.key, lines = cart.line_count(), "Loaded cart");
        Ok(cart)
    }

    /// Writes the full cart in the current schema.
    pub async fn save(&self, cart: &Cart) -> StoreResult<()> {
        let document = CartDocument::new(cart.lines().to_vec());
        self.storage.try_set(&self.key, &document).await?;
        debug!(key = %self.key, lines = cart.line_count(), "Saved cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::{MemoryStore, SqliteConfig, SqliteStore};
    use crafts_core::{Category, Money, Product};
    use serde_json::json;

    fn lamp() -> Product {
        Product {
            id: 1,
            title: "Classic Dodgers Table Lamp".to_string(),
            category: Category::Lamps,
            price: Money::from_cents(6500),
            description: String::new(),
            image: "lamp-01.jpg".to_string(),
            featured: true,
        }
    }

    fn line_json(id: u32, quantity: i64) -> Value {
        json!({
            "id": id,
            "title": format!("Product {}", id),
            "category": "novelty",
            "price": 1800,
            "description": "",
            "image": "",
            "featured": false,
            "quantity": quantity,
        })
    }

    #[tokio::test]
    async fn test_missing_key_loads_empty() {
        let repo = CartRepository::new(Storage::memory(), DEFAULT_CART_KEY);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = CartRepository::new(Storage::memory(), DEFAULT_CART_KEY);
        let mut cart = Cart::new();
        cart.add(&lamp());
        cart.add(&lamp());

        repo.save(&cart).await.unwrap();
        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, cart);
    }

    #[tokio::test]
    async fn test_load_repairs_external_writes() {
        let storage = Storage::memory();
        storage
            .try_set(
                DEFAULT_CART_KEY,
                &json!({
                    "version": 2,
                    "savedAt": "2024-05-01T12:00:00Z",
                    "items": [line_json(6, 1), line_json(9, 0), line_json(6, 2), line_json(4, -3)],
                }),
            )
            .await
            .unwrap();

        let cart = CartRepository::new(storage, DEFAULT_CART_KEY).load().await.unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(6).map(|l| l.quantity), Some(3));
    }

    #[tokio::test]
    async fn test_load_migrates_v1_and_next_save_upgrades() {
        let storage = Storage::memory();
        // v1 prices were dollars.
        let mut v1 = line_json(5, 2);
        v1["price"] = json!(24);
        storage.try_set(DEFAULT_CART_KEY, &json!([v1])).await.unwrap();

        let repo = CartRepository::new(storage.clone(), DEFAULT_CART_KEY);
        let cart = repo.load().await.unwrap();
        assert_eq!(cart.total(), Money::from_cents(4800));

        repo.save(&cart).await.unwrap();
        let raw: Value = storage.try_get(DEFAULT_CART_KEY).await.unwrap().unwrap();
        assert_eq!(raw["version"], 2);
        assert_eq!(raw["items"][0]["price"], 2400);
    }

    #[tokio::test]
    async fn test_newer_schema_is_reported() {
        let storage = Storage::memory();
        storage
            .try_set(DEFAULT_CART_KEY, &json!({"version": 9, "items": []}))
            .await
            .unwrap();

        let err = CartRepository::new(storage, DEFAULT_CART_KEY)
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedSchema { found: 9, .. }));
    }

    #[tokio::test]
    async fn test_save_failure_surfaces() {
        let repo = CartRepository::new(Storage::new(MemoryStore::with_quota(16)), DEFAULT_CART_KEY);
        let mut cart = Cart::new();
        cart.add(&lamp());

        assert!(matches!(
            repo.save(&cart).await,
            Err(StoreError::QuotaExceeded { .. })
        ));
    }

    #[tokio::test]
    async fn test_sqlite_backed_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = Cart::new();
        cart.add(&lamp());

        let store = SqliteStore::open(SqliteConfig::in_dir(dir.path())).await.unwrap();
        let repo = CartRepository::new(Storage::new(store.clone()), DEFAULT_CART_KEY);
        repo.save(&cart).await.unwrap();
        store.close().await;

        let store = SqliteStore::open(SqliteConfig::in_dir(dir.path())).await.unwrap();
        let restored = CartRepository::new(Storage::new(store), DEFAULT_CART_KEY)
            .load()
            .await
            .unwrap();
        assert_eq!(restored.total_quantity(), 1);
        assert_eq!(restored.lines()[0].product, lamp());
    }
}
