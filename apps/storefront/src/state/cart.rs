//! # Cart Store
//!
//! The live cart, mirrored to storage after every mutation.
//!
//! ## Thread Safety
//! The cart sits behind a `tokio::sync::Mutex` held for one mutation plus
//! its persistence write. Writers queue on the lock in FIFO order, so the
//! stored snapshot always follows the order of mutations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action          CartStore              Effects                    │
//! │  ───────────          ─────────              ───────                    │
//! │                                                                         │
//! │  Add button ────────► add(product) ────────► save, CartChanged,        │
//! │                                              "Added to cart!"          │
//! │                                                                         │
//! │  + / − buttons ─────► update_quantity(id,±1) ► save, CartChanged       │
//! │                                              ("Item removed from cart" │
//! │                                               when it hits zero)       │
//! │                                                                         │
//! │  Clear ─────────────► clear() ─────────────► save, CartChanged,        │
//! │                                              "Cart cleared"            │
//! │                                                                         │
//! │  Checkout ──────────► checkout() ──────────► two demo notices only     │
//! │                                                                         │
//! │  A failed save never undoes the change: it logs and adds a warning     │
//! │  notice, and the in-memory cart stays ahead of storage.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crafts_core::{
    Cart, CartLine, CartTotals, CoreError, CoreResult, Money, Product, ProductId, QuantityChange,
};
use crafts_store::{CartRepository, CatalogSource, StoreError};

use crate::events::{EventBus, Notice, StorefrontEvent};
use crate::state::config::CurrencyConfig;

pub const ADDED_MESSAGE: &str = "Added to cart!";
pub const REMOVED_MESSAGE: &str = "Item removed from cart";
pub const CLEARED_MESSAGE: &str = "Cart cleared";
pub const DEMO_CHECKOUT_MESSAGE: &str = "This is a demo - no actual checkout available";
pub const SAVE_FAILED_MESSAGE: &str =
    "Your cart could not be saved. Changes will be lost when you leave.";
pub const RESTORE_FAILED_MESSAGE: &str = "Your saved cart could not be restored.";

/// Result of a simulated checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    pub reference: Uuid,
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    repo: CartRepository,
    events: EventBus,
    currency: CurrencyConfig,
    restore_error: Option<String>,
}

impl CartStore {
    /// Restores the persisted cart, or starts empty if it cannot be read.
    pub async fn restore(repo: CartRepository, events: EventBus, currency: CurrencyConfig) -> Self {
        let (cart, restore_error) = match repo.load().await {
            Ok(cart) => {
                info!(
                    key = repo.key(),
                    lines = cart.line_count(),
                    items = cart.total_quantity(),
                    "Cart restored"
                );
                (cart, None)
            }
            Err(e) => {
                warn!(key = repo.key(), error = %e, "Could not restore cart, starting empty");
                events.notify(Notice::warning(RESTORE_FAILED_MESSAGE));
                (Cart::new(), Some(e.to_string()))
            }
        };

        CartStore {
            cart: Mutex::new(cart),
            repo,
            events,
            currency,
            restore_error,
        }
    }

    /// Why the startup restore failed, if it did.
    pub fn restore_error(&self) -> Option<&str> {
        self.restore_error.as_deref()
    }

    /// Writes the cart; a failure becomes a warning notice.
    async fn persist(&self, cart: &Cart) -> bool {
        match self.repo.save(cart).await {
            Ok(()) => true,
            Err(e) => {
                self.report_save_failure(&e);
                false
            }
        }
    }

    fn report_save_failure(&self, err: &StoreError) {
        warn!(key = self.repo.key(), error = %err, "Cart save failed, keeping in-memory cart");
        self.events.notify(Notice::warning(SAVE_FAILED_MESSAGE));
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`. Returns the line's new quantity.
    pub async fn add(&self, product: &Product) -> i64 {
        let quantity = {
            let mut cart = self.cart.lock().await;
            let quantity = cart.add(product);
            self.persist(&cart).await;
            quantity
        };

        debug!(product_id = product.id, quantity, "Added to cart");
        self.events.publish(StorefrontEvent::CartChanged);
        self.events.notify(Notice::success(ADDED_MESSAGE));
        quantity
    }

    /// Looks `id` up in the catalog and adds it.
    pub async fn add_by_id(&self, catalog: &dyn CatalogSource, id: ProductId) -> CoreResult<i64> {
        let product = catalog
            .product_by_id(id)
            .await
            .ok_or(CoreError::ProductNotFound(id))?;
        Ok(self.add(&product).await)
    }

    /// Adds `delta` to a line. Zero or below removes it; unknown ids do nothing.
    pub async fn update_quantity(&self, product_id: ProductId, delta: i64) -> QuantityChange {
        let change = {
            let mut cart = self.cart.lock().await;
            let change = cart.update_quantity(product_id, delta);
            if change.is_change() {
                self.persist(&cart).await;
            }
            change
        };

        debug!(product_id, delta, ?change, "Quantity update");
        match change {
            QuantityChange::NotInCart => {}
            QuantityChange::Updated { .. } => {
                self.events.publish(StorefrontEvent::CartChanged);
            }
            QuantityChange::Removed => {
                self.events.publish(StorefrontEvent::CartChanged);
                self.events.notify(Notice::info(REMOVED_MESSAGE));
            }
        }
        change
    }

    /// Empties the cart and persists the empty cart.
    pub async fn clear(&self) {
        {
            let mut cart = self.cart.lock().await;
            cart.clear();
            self.persist(&cart).await;
        }

        debug!("Cart cleared");
        self.events.publish(StorefrontEvent::CartChanged);
        self.events.notify(Notice::info(CLEARED_MESSAGE));
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Runs `f` against a consistent view of the cart.
    pub async fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().await;
        f(&cart)
    }

    pub async fn items(&self) -> Vec<CartLine> {
        self.with_cart(|c| c.lines().to_vec()).await
    }

    /// Sum of quantities.
    pub async fn count(&self) -> i64 {
        self.with_cart(Cart::total_quantity).await
    }

    pub async fn total(&self) -> Money {
        self.with_cart(Cart::total).await
    }

    pub async fn totals(&self) -> CartTotals {
        self.with_cart(Cart::totals).await
    }

    /// Simulated checkout. Reads only; `None` for an empty cart.
    pub async fn checkout(&self) -> Option<CheckoutConfirmation> {
        let summary = self.with_cart(Cart::checkout_summary).await?;

        let message = format!(
            "Demo checkout: {} items, Total: {}",
            summary.line_count,
            self.currency.format(summary.total)
        );

        self.events.notify(Notice::info(DEMO_CHECKOUT_MESSAGE));
        self.events.notify(Notice::warning(message.clone()));

        let confirmation = CheckoutConfirmation {
            reference: Uuid::new_v4(),
            line_count: summary.line_count,
            total_quantity: summary.total_quantity,
            total: summary.total,
            message,
            created_at: Utc::now(),
        };
        info!(reference = %confirmation.reference, total = %confirmation.total, "Demo checkout");
        Some(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crafts_core::Category;
    use crafts_store::{InMemoryCatalog, MemoryStore, SqliteStore, Storage, DEFAULT_CART_KEY};
    use serde_json::Value;
    use tokio::sync::broadcast;

    fn product(id: ProductId, cents: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            category: Category::Keychains,
            price: Money::from_cents(cents),
            description: String::new(),
            image: String::new(),
            featured: false,
        }
    }

    async fn store_with(storage: Storage) -> (CartStore, broadcast::Receiver<StorefrontEvent>) {
        let events = EventBus::new();
        let rx = events.subscribe();
        let repo = CartRepository::new(storage, DEFAULT_CART_KEY);
        let store = CartStore::restore(repo, events, CurrencyConfig::default()).await;
        (store, rx)
    }

    fn drain(rx: &mut broadcast::Receiver<StorefrontEvent>) -> Vec<StorefrontEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    async fn persisted_items(storage: &Storage) -> Vec<Value> {
        let raw: Value = storage.try_get(DEFAULT_CART_KEY).await.unwrap().unwrap();
        raw["items"].as_array().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_add_persists_and_notifies() {
        let storage = Storage::memory();
        let (store, mut rx) = store_with(storage.clone()).await;

        assert_eq!(store.add(&product(1, 1200)).await, 1);
        assert_eq!(store.add(&product(1, 1200)).await, 2);

        let items = persisted_items(&storage).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["quantity"], 2);

        assert_eq!(
            drain(&mut rx),
            vec![
                StorefrontEvent::CartChanged,
                StorefrontEvent::Notice(Notice::success(ADDED_MESSAGE)),
                StorefrontEvent::CartChanged,
                StorefrontEvent::Notice(Notice::success(ADDED_MESSAGE)),
            ]
        );
    }

    #[tokio::test]
    async fn test_count_sums_quantities() {
        let (store, _rx) = store_with(Storage::memory()).await;
        for _ in 0..2 {
            store.add(&product(1, 100)).await;
        }
        for _ in 0..3 {
            store.add(&product(2, 100)).await;
        }
        assert_eq!(store.count().await, 5);
        assert_eq!(store.items().await.len(), 2);
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_everywhere() {
        let storage = Storage::memory();
        let (store, mut rx) = store_with(storage.clone()).await;
        store.add(&product(1, 100)).await;
        store.add(&product(1, 100)).await;
        drain(&mut rx);

        assert_eq!(
            store.update_quantity(1, -1).await,
            QuantityChange::Updated { quantity: 1 }
        );
        assert_eq!(store.update_quantity(1, -1).await, QuantityChange::Removed);

        assert!(store.items().await.is_empty());
        assert!(persisted_items(&storage).await.is_empty());
        assert_eq!(
            drain(&mut rx),
            vec![
                StorefrontEvent::CartChanged,
                StorefrontEvent::CartChanged,
                StorefrontEvent::Notice(Notice::info(REMOVED_MESSAGE)),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_silent() {
        let storage = Storage::memory();
        let (store, mut rx) = store_with(storage.clone()).await;

        assert_eq!(store.update_quantity(42, 1).await, QuantityChange::NotInCart);
        assert!(drain(&mut rx).is_empty());
        assert!(storage.try_get::<Value>(DEFAULT_CART_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_add_remove_scenario() {
        let (store, _rx) = store_with(Storage::memory()).await;
        let a = product(1, 6500);

        store.add(&a).await;
        assert_eq!((store.count().await, store.total().await), (1, a.price));
        store.add(&a).await;
        assert_eq!((store.count().await, store.total().await), (2, a.price * 2));
        assert_eq!(store.items().await.len(), 1);

        store.update_quantity(a.id, -2).await;
        assert!(store.items().await.is_empty());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_clear_persists_empty_cart() {
        let storage = Storage::memory();
        let (store, mut rx) = store_with(storage.clone()).await;
        store.add(&product(1, 100)).await;
        drain(&mut rx);

        store.clear().await;
        assert!(store.items().await.is_empty());
        assert!(persisted_items(&storage).await.is_empty());
        assert_eq!(
            drain(&mut rx),
            vec![
                StorefrontEvent::CartChanged,
                StorefrontEvent::Notice(Notice::info(CLEARED_MESSAGE)),
            ]
        );
    }

    #[tokio::test]
    async fn test_save_failure_keeps_memory_and_warns() {
        let (store, mut rx) = store_with(Storage::new(MemoryStore::with_quota(32))).await;

        assert_eq!(store.add(&product(1, 100)).await, 1);
        assert_eq!(store.count().await, 1);

        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![
                StorefrontEvent::Notice(Notice::warning(SAVE_FAILED_MESSAGE)),
                StorefrontEvent::CartChanged,
                StorefrontEvent::Notice(Notice::success(ADDED_MESSAGE)),
            ]
        );
    }

    #[tokio::test]
    async fn test_restores_previous_session() {
        let storage = Storage::memory();
        {
            let (store, _rx) = store_with(storage.clone()).await;
            store.add(&product(3, 4800)).await;
            store.add(&product(3, 4800)).await;
        }

        let (store, _rx) = store_with(storage).await;
        assert!(store.restore_error().is_none());
        assert_eq!(store.count().await, 2);
        assert_eq!(store.total().await.cents(), 9600);
    }

    #[tokio::test]
    async fn test_restores_from_sqlite() {
        let storage = Storage::new(SqliteStore::in_memory().await.unwrap());
        {
            let (store, _rx) = store_with(storage.clone()).await;
            store.add(&product(5, 2400)).await;
            store.add(&product(6, 1800)).await;
            store.update_quantity(5, 2).await;
        }

        let (store, _rx) = store_with(storage).await;
        assert_eq!(store.count().await, 4);
        let ids: Vec<_> = store.items().await.iter().map(|l| l.product.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_all_persist() {
        let storage = Storage::memory();
        let (store, _rx) = store_with(storage.clone()).await;
        let store = std::sync::Arc::new(store);

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.add(&product(i % 4, 100)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.count().await, 20);
        let persisted: i64 = persisted_items(&storage)
            .await
            .iter()
            .map(|item| item["quantity"].as_i64().unwrap())
            .sum();
        assert_eq!(persisted, 20);
    }

    #[tokio::test]
    async fn test_unreadable_restore_starts_empty() {
        let storage = Storage::memory();
        storage
            .try_set(DEFAULT_CART_KEY, &serde_json::json!({"version": 7, "items": []}))
            .await
            .unwrap();

        let (store, _rx) = store_with(storage.clone()).await;
        assert!(store.items().await.is_empty());
        assert!(store.restore_error().unwrap().contains("version 7"));

        // Next write replaces the unreadable blob.
        store.add(&product(1, 100)).await;
        let raw: Value = storage.try_get(DEFAULT_CART_KEY).await.unwrap().unwrap();
        assert_eq!(raw["version"], 2);
    }

    #[tokio::test]
    async fn test_checkout_reports_without_mutating() {
        let (store, mut rx) = store_with(Storage::memory()).await;
        assert!(store.checkout().await.is_none());
        assert!(drain(&mut rx).is_empty());

        store.add(&product(1, 6500)).await;
        store.add(&product(1, 6500)).await;
        store.add(&product(2, 1200)).await;
        drain(&mut rx);

        let confirmation = store.checkout().await.unwrap();
        assert_eq!(confirmation.line_count, 2);
        assert_eq!(confirmation.total_quantity, 3);
        assert_eq!(confirmation.total.cents(), 14200);
        assert_eq!(confirmation.message, "Demo checkout: 2 items, Total: $142.00");
        assert_eq!(store.count().await, 3);

        assert_eq!(
            drain(&mut rx),
            vec![
                StorefrontEvent::Notice(Notice::info(DEMO_CHECKOUT_MESSAGE)),
                StorefrontEvent::Notice(Notice::warning("Demo checkout: 2 items, Total: $142.00")),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_by_id() {
        let (store, _rx) = store_with(Storage::memory()).await;
        let catalog = InMemoryCatalog::sample();

        assert_eq!(store.add_by_id(&catalog, 1).await.unwrap(), 1);
        assert!(matches!(
            store.add_by_id(&catalog, 404).await,
            Err(CoreError::ProductNotFound(404))
        ));
        assert_eq!(store.count().await, 1);
        assert_eq!(store.items().await[0].product.title, "Classic Dodgers Table Lamp");
    }
}
