//! # Repository Module
//!
//! Typed access on top of the storage adapter and catalog data.
//!
//! ## Available Repositories
//!
//! - [`CartRepository`] - Load and save the cart blob (with migrations)
//! - [`CatalogSource`] - Read-only catalog queries, [`InMemoryCatalog`] ships by default
//! - [`ContactInbox`] - Contact form delivery, [`SimulatedInbox`] ships by default

pub mod cart;
pub mod catalog;
pub mod contact;

pub use cart::{CartRepository, DEFAULT_CART_KEY};
pub use catalog::{CatalogData, CatalogLatency, CatalogSource, InMemoryCatalog};
pub use contact::{ContactInbox, SimulatedInbox};
