//! # State Module
//!
//! Long-lived state owned by the [`Storefront`](crate::Storefront) context.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────────┐    │
//! │  │   StorefrontConfig   │          │         CartStore            │    │
//! │  │                      │          │                              │    │
//! │  │  site, currency      │          │  Mutex<Cart>                 │    │
//! │  │  catalog, storage    │          │  CartRepository (storage)    │    │
//! │  │  carousel            │          │  EventBus (notices)          │    │
//! │  └──────────────────────┘          └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StorefrontConfig: read-only after startup                           │
//! │  • CartStore: one mutation + its save under the lock                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
pub mod config;

pub use cart::{
    CartStore, CheckoutConfirmation, ADDED_MESSAGE, CLEARED_MESSAGE, DEMO_CHECKOUT_MESSAGE,
    REMOVED_MESSAGE, RESTORE_FAILED_MESSAGE, SAVE_FAILED_MESSAGE,
};
pub use config::{
    CarouselConfig, CatalogConfig, CurrencyConfig, SiteConfig, StorageBackend, StorageConfig,
    StorefrontConfig,
};
