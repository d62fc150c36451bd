//! # Commands Module
//!
//! Every operation the browser views can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Product listing, paging, lookups, gallery, testimonials
//! ├── cart.rs     ◄─── Cart manipulation and demo checkout
//! ├── contact.rs  ◄─── Contact form submission
//! └── config.rs   ◄─── Site information
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View                                                                   │
//! │  ────                                                                   │
//! │  "Add to cart" clicked on product 5                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                          │
//! │      store.catalog(),      ◄── only the state it needs                 │
//! │      store.cart(),                                                     │
//! │      5,                                                                │
//! │  ) -> ApiResult<CartResponse>                                          │
//! │         │                                                               │
//! │         │ (serde_json)                                                  │
//! │         ▼                                                               │
//! │  { "items": [...], "totals": {...} }   or   { "code": "NOT_FOUND", ..} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Side effects that are not return values (badge refresh, toasts) arrive on
//! the [`EventBus`](crate::events::EventBus).

pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
