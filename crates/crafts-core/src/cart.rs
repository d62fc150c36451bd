//! # Cart
//!
//! The shopping cart: an ordered list of product snapshots with quantities.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Invariants                                 │
//! │                                                                         │
//! │  1. At most one line per product id                                    │
//! │     add(A), add(A)          → [A × 2]          (never [A × 1, A × 1])  │
//! │                                                                         │
//! │  2. Every line has quantity ≥ 1                                        │
//! │     [A × 1] update(A, -1)   → []               (never [A × 0])         │
//! │                                                                         │
//! │  3. Lines keep insertion order                                         │
//! │     add(B), add(A), add(B)  → [B × 2, A × 1]                           │
//! │                                                                         │
//! │  count = Σ quantity        total = Σ price × quantity                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every constructor and mutator upholds these, including [`Cart::from_lines`]
//! which repairs lines restored from storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart plus its quantity.
///
/// The product is a frozen snapshot: later catalog changes do not touch
/// lines already in a cart. Serialized flat, as `{..product fields, quantity}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in cart, always ≥ 1 inside a [`Cart`].
    pub quantity: i64,

    /// When this line was first added.
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line with quantity 1.
    pub fn new(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// The product id this line is keyed by.
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Quantity Change
// =============================================================================

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The product has no line in the cart; nothing changed.
    NotInCart,
    /// The line now holds this quantity.
    Updated { quantity: i64 },
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

impl QuantityChange {
    /// Returns true if the cart was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, QuantityChange::NotInCart)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from untrusted lines (e.g. restored from storage).
    ///
    /// Lines with quantity ≤ 0 are dropped and repeated product ids are merged
    /// into the first occurrence, summing quantities. The first occurrence's
    /// snapshot and position win.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = CartLine>,
    {
        let mut cart = Cart::new();

        for line in lines {
            if line.quantity <= 0 {
                continue;
            }

            match cart.line_mut(line.product_id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Adds one unit of a product.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    /// Returns the line's new quantity. There is no capacity limit.
    pub fn add(&mut self, product: &Product) -> i64 {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine::new(product));
        1
    }

    /// Adds `delta` to a line's quantity.
    ///
    /// A resulting quantity ≤ 0 removes the line entirely. A product that is
    /// not in the cart is left alone.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> QuantityChange {
        let Some(index) = self.position(product_id) else {
            return QuantityChange::NotInCart;
        };

        let new_quantity = self.lines[index].quantity.saturating_add(delta);
        if new_quantity <= 0 {
            self.lines.remove(index);
            return QuantityChange::Removed;
        }

        self.lines[index].quantity = new_quantity;
        QuantityChange::Updated {
            quantity: new_quantity,
        }
    }

    /// Removes a product's line. Returns false if it was not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        match self.position(product_id) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines (the badge count).
    ///
    /// Saturates at `i64::MAX` rather than overflowing.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Σ price × quantity, saturating.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Snapshot of the cart's aggregate numbers.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    /// Summary for a simulated checkout, or `None` for an empty cart.
    ///
    /// Reads only; checkout never mutates the cart.
    pub fn checkout_summary(&self) -> Option<CheckoutSummary> {
        if self.is_empty() {
            return None;
        }

        Some(CheckoutSummary {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            total: self.total(),
        })
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id() == product_id)
    }
}

// =============================================================================
// Totals & Checkout Summary
// =============================================================================

/// Cart totals for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

/// What a simulated checkout reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
