//! # crafts-store: Storage Layer for the Crafts Storefront
//!
//! Key/value persistence, the persisted cart format and the catalog provider.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Crafts Storefront Data Flow                         │
//! │                                                                         │
//! │  CartStore / catalog commands (crafts-storefront)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   crafts-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (storage/)    │◄───│ CartRepository│    │  cart v1→v2  │  │   │
//! │  │   │ SQLite/Memory │    │ CatalogSource │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/storefront.db, table kv    (SQLite backend)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - `KeyValueStore` backends and the JSON `Storage` adapter
//! - [`migrations`] - Persisted cart schema and migrate-on-read
//! - [`repository`] - Cart persistence and catalog sources
//! - [`sample`] - Built-in sample catalog
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use crafts_store::{CartRepository, Storage, DEFAULT_CART_KEY};
//!
//! # async fn demo() -> crafts_store::StoreResult<()> {
//! let repo = CartRepository::new(Storage::memory(), DEFAULT_CART_KEY);
//! let cart = repo.load().await?;
//! assert!(cart.is_empty());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod repository;
pub mod sample;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use migrations::{CartDocument, CART_SCHEMA_VERSION};
pub use storage::{
    validate_key, KeyValueStore, MemoryStore, SqliteConfig, SqliteStore, Storage, DATABASE_FILE,
};

// Repository re-exports for convenience
pub use repository::cart::{CartRepository, DEFAULT_CART_KEY};
pub use repository::catalog::{CatalogData, CatalogLatency, CatalogSource, InMemoryCatalog};
pub use repository::contact::{ContactInbox, SimulatedInbox};
