//! # Crafts Storefront Library
//!
//! The storefront engine behind the Danny's Dodgers Crafts pages: one
//! [`Storefront`] context holding config, catalog, cart and event bus, plus
//! the commands the views call.
//!
//! ## Module Organization
//! ```text
//! crafts_storefront/
//! ├── lib.rs          ◄─── You are here (context, bootstrap, host loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore (persisted cart + notices)
//! │   └── config.rs   ◄─── StorefrontConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Listing, paging, lookups
//! │   ├── cart.rs     ◄─── Cart manipulation, demo checkout
//! │   ├── contact.rs  ◄─── Contact form submission
//! │   └── config.rs   ◄─── Site information
//! ├── carousel.rs     ◄─── Testimonial carousel task + handle
//! ├── events.rs       ◄─── EventBus (broadcast)
//! └── error.rs        ◄─── ApiError, StartupError
//! ```
//!
//! ## Context
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront                                      │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │ StorefrontConfig │ │ dyn CatalogSource│ │ CartStore            │    │
//! │  │  read-only       │ │  sample or JSON  │ │  Mutex<Cart> + repo  │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────┬───────────┘    │
//! │  ┌──────────────────┐                                  │                │
//! │  │ dyn ContactInbox │ ── contact notices ──────────────┤                │
//! │  └──────────────────┘                                  │                │
//! │                                                        │ notices        │
//! │  ┌──────────────────┐                      ┌───────────▼───────────┐   │
//! │  │ CarouselHandle   │ ── SlideChanged ───► │ EventBus              │   │
//! │  │ (started apart)  │                      │  CartChanged, Notice  │   │
//! │  └──────────────────┘                      └───────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod carousel;
pub mod commands;
pub mod error;
pub mod events;
pub mod state;

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crafts_store::{
    CartRepository, CatalogSource, ContactInbox, InMemoryCatalog, MemoryStore, SimulatedInbox,
    SqliteConfig, SqliteStore, Storage,
};

use carousel::{CarouselHandle, CarouselService};
use error::{StartupError, StartupResult};
use events::EventBus;
use state::{CartStore, StorageBackend, StorageConfig, StorefrontConfig};

/// Everything a running storefront owns.
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogSource>,
    contact: Arc<dyn ContactInbox>,
    cart: CartStore,
    events: EventBus,
}

impl Storefront {
    /// Builds the storefront from a validated config.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Catalog ─────► JSON file at catalog.path, else the sample catalog  │
    /// │                    (invalid data is fatal), latency from config        │
    /// │                                                                         │
    /// │  2. Storage ─────► <data dir>/storefront.db (migrated), or memory      │
    /// │                                                                         │
    /// │  3. Cart ────────► restore from storage.cart_key; unreadable data      │
    /// │                    starts an empty cart with a warning                 │
    /// │                                                                         │
    /// │  4. Contact ─────► simulated inbox with the configured delay           │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn bootstrap(config: StorefrontConfig) -> StartupResult<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => InMemoryCatalog::from_json_file(path).map_err(StartupError::Catalog)?,
            None => InMemoryCatalog::sample(),
        };
        info!(
            products = catalog.data().products.len(),
            testimonials = catalog.data().testimonials.len(),
            "Catalog ready"
        );
        let catalog = catalog.with_latency(config.catalog.latency());

        let storage = open_storage(&config.storage).await?;
        let events = EventBus::new();
        let cart = CartStore::restore(
            CartRepository::new(storage, config.storage.cart_key.clone()),
            events.clone(),
            config.currency.clone(),
        )
        .await;
        let contact = SimulatedInbox::new(config.catalog.submit_latency());

        Ok(Storefront {
            config,
            catalog: Arc::new(catalog),
            contact: Arc::new(contact),
            cart,
            events,
        })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &dyn CatalogSource {
        self.catalog.as_ref()
    }

    pub fn contact(&self) -> &dyn ContactInbox {
        self.contact.as_ref()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Starts the testimonial carousel over the catalog's testimonials.
    pub async fn start_carousel(&self) -> CarouselHandle {
        let slides = self.catalog.testimonials().await.len();
        CarouselService::new(slides, &self.config.carousel, self.events.clone()).start()
    }
}

async fn open_storage(config: &StorageConfig) -> StartupResult<Storage> {
    let storage = match config.backend {
        StorageBackend::Memory => match config.quota_bytes {
            Some(quota) => Storage::new(MemoryStore::with_quota(quota)),
            None => Storage::memory(),
        },
        StorageBackend::Sqlite => {
            let dir = config.resolved_data_dir().ok_or_else(|| {
                StartupError::InvalidConfig(
                    "no data directory available; set storage.data_dir".to_string(),
                )
            })?;
            let store = SqliteStore::open(SqliteConfig::in_dir(dir))
                .await
                .map_err(StartupError::Storage)?;
            Storage::new(store)
        }
    };

    info!(backend = %config.backend, "Storage ready");
    Ok(storage)
}

/// Runs the headless storefront until Ctrl-C.
///
/// Restores the cart, starts the carousel and logs every event on the bus.
pub async fn run() -> StartupResult<()> {
    init_tracing();

    info!("Starting Danny's Dodgers Crafts storefront");

    let config = StorefrontConfig::load(None)?;
    let storefront = Storefront::bootstrap(config).await?;
    let totals = storefront.cart().totals().await;
    info!(
        site = %storefront.config().site.name,
        cart_items = totals.total_quantity,
        cart_total = %storefront.config().format_currency(totals.total),
        "Storefront ready"
    );

    let mut events = storefront.events().subscribe();
    let carousel = storefront.start_carousel().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(error = %e, "Could not listen for Ctrl-C");
                }
                break;
            }
            event = events.recv() => match event {
                Ok(event) => info!(?event, "Storefront event"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event log fell behind"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    if let Err(e) = carousel.shutdown().await {
        warn!(error = %e, "Carousel already stopped");
    }
    info!("Storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=crafts_store=trace` - Show trace for the storage crate only
/// - Default: INFO, DEBUG for the crafts crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,crafts=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crafts_core::ContactRequest;
    use crafts_store::{CatalogData, DATABASE_FILE};

    fn memory_config() -> StorefrontConfig {
        let mut config = StorefrontConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.catalog.simulate_latency = false;
        config
    }

    #[tokio::test]
    async fn test_bootstrap_with_memory_storage() {
        let storefront = Storefront::bootstrap(memory_config()).await.unwrap();

        let lamps = commands::catalog::list_products(storefront.catalog(), "lamps")
            .await
            .unwrap();
        assert_eq!(lamps.len(), 3);

        commands::cart::add_to_cart(storefront.catalog(), storefront.cart(), 1)
            .await
            .unwrap();
        assert_eq!(storefront.cart().count().await, 1);
    }

    #[tokio::test]
    async fn test_sqlite_storage_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config();
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.data_dir = Some(dir.path().to_path_buf());

        {
            let storefront = Storefront::bootstrap(config.clone()).await.unwrap();
            commands::cart::add_to_cart(storefront.catalog(), storefront.cart(), 3)
                .await
                .unwrap();
            commands::cart::add_to_cart(storefront.catalog(), storefront.cart(), 3)
                .await
                .unwrap();
        }
        assert!(dir.path().join(DATABASE_FILE).exists());

        let storefront = Storefront::bootstrap(config).await.unwrap();
        assert_eq!(storefront.cart().count().await, 2);
        assert_eq!(storefront.cart().items().await[0].product.id, 3);
    }

    #[tokio::test]
    async fn test_bootstrap_from_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let data = CatalogData {
            products: crafts_store::sample::sample_products()
                .into_iter()
                .take(2)
                .collect(),
            ..CatalogData::default()
        };
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let mut config = memory_config();
        config.catalog.path = Some(path);
        assert!(Storefront::bootstrap(config).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_catalog_file_is_fatal() {
        let mut config = memory_config();
        config.catalog.path = Some("/definitely/not/here.json".into());

        assert!(matches!(
            Storefront::bootstrap(config).await,
            Err(StartupError::Catalog(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_dir_that_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = memory_config();
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.data_dir = Some(file.path().to_path_buf());

        assert!(matches!(
            Storefront::bootstrap(config).await,
            Err(StartupError::Storage(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_carousel_over_testimonials() {
        let storefront = Storefront::bootstrap(memory_config()).await.unwrap();
        let carousel = storefront.start_carousel().await;

        let state = carousel.state();
        assert_eq!(state.current, Some(0));
        assert_eq!(
            state.total,
            commands::catalog::get_testimonials(storefront.catalog()).await.len()
        );
        carousel.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_quota_backed_memory_storage() {
        let mut config = memory_config();
        config.storage.quota_bytes = Some(16);
        let storefront = Storefront::bootstrap(config).await.unwrap();

        let product = crafts_store::sample::sample_products().remove(0);
        storefront.cart().add(&product).await;
        assert_eq!(storefront.cart().count().await, 1);
        assert_eq!(storefront.cart().total().await, product.price);
    }

    #[tokio::test(start_paused = true)]
    async fn test_contact_uses_configured_delay() {
        let mut config = memory_config();
        config.catalog.simulate_latency = true;
        config.catalog.submit_latency_ms = 1000;
        let storefront = Storefront::bootstrap(config).await.unwrap();
        let start = tokio::time::Instant::now();

        let request = ContactRequest {
            name: "Danny".to_string(),
            email: "fan@example.com".to_string(),
            subject: String::new(),
            message: "Hello from Pasadena".to_string(),
        };
        let receipt =
            commands::contact::submit_contact(storefront.contact(), storefront.events(), request)
                .await
                .unwrap();

        assert!(start.elapsed() >= std::time::Duration::from_millis(1000));
        assert_eq!(receipt.message, commands::contact::CONTACT_REPLY);
    }
}
