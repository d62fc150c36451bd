//! # crafts-core: Pure Business Logic for the Crafts Storefront
//!
//! This crate contains the storefront's business rules as pure functions and
//! plain data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Crafts Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Views                                │   │
//! │  │    Catalog Grid ──► Cart Modal ──► Testimonial Carousel         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    crafts-storefront                            │   │
//! │  │    CartStore, CarouselService, EventBus, commands               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crafts-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ carousel │ │ listing │ │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │ Carousel │ │ paging  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TIMERS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    crafts-store (Storage Layer)                 │   │
//! │  │          key/value backends, cart persistence, catalog          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Category, GalleryItem, Testimonial)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart and CartLine with the one-line-per-product invariant
//! - [`carousel`] - Testimonial rotation state machine
//! - [`listing`] - Filtered, paged product listing
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog data validation
//!
//! ## Example Usage
//!
//! ```rust
//! use crafts_core::{Cart, Category, Money, Product};
//!
//! let lamp = Product {
//!     id: 1,
//!     title: "Classic Table Lamp".to_string(),
//!     category: Category::Lamps,
//!     price: Money::from_major_minor(65, 0),
//!     description: String::new(),
//!     image: "lamp-01.jpg".to_string(),
//!     featured: true,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&lamp);
//! cart.add(&lamp);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total().cents(), 13000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod carousel;
pub mod cart;
pub mod contact;
pub mod error;
pub mod listing;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use carousel::{Carousel, CarouselMode, PauseReason};
pub use cart::{Cart, CartLine, CartTotals, CheckoutSummary, QuantityChange};
pub use contact::ContactRequest;
pub use error::{CoreError, CoreResult, ValidationError};
pub use listing::ProductListing;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products shown before the first "load more".
pub const DEFAULT_INITIAL_LOAD_COUNT: usize = 8;

/// Number of products each "load more" reveals.
pub const DEFAULT_LOAD_MORE_COUNT: usize = 4;

/// Highest testimonial rating (stars).
pub const MAX_RATING: u8 = 5;
