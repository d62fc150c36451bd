//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                    │
//! │  │  Empty   │────►│ In Cart  │────►│ Demo checkout│                    │
//! │  │  Cart    │     │          │     │ (no change)  │                    │
//! │  └──────────┘     └──────────┘     └──────────────┘                    │
//! │       ▲                │                                                │
//! │       │           add_to_cart                                          │
//! │       │           update_cart_item (±1, 0 removes)                     │
//! │       │                │                                                │
//! │       └──────── clear_cart                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crafts_core::{Cart, CartLine, CartTotals, CoreError, ProductId};
use crafts_store::CatalogSource;

use crate::error::ApiResult;
use crate::state::{CartStore, CheckoutConfirmation};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated totals
pub async fn get_cart(cart: &CartStore) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c)).await
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by one
/// - If product not in cart: added as a new line with quantity 1
/// - The line keeps the product as it was when added
///
/// ## Errors
/// `NOT_FOUND` when the catalog has no such product; the cart is untouched.
pub async fn add_to_cart(
    catalog: &dyn CatalogSource,
    cart: &CartStore,
    product_id: ProductId,
) -> ApiResult<CartResponse> {
    debug!(product_id, "add_to_cart command");

    cart.add_by_id(catalog, product_id).await?;
    Ok(get_cart(cart).await)
}

/// Changes a line's quantity by `delta` (the +/− buttons send ±1).
///
/// ## Behavior
/// - Resulting quantity ≤ 0: line removed
/// - Product not in cart: nothing happens
/// - Quantities and totals saturate instead of overflowing
pub async fn update_cart_item(cart: &CartStore, product_id: ProductId, delta: i64) -> CartResponse {
    debug!(product_id, delta, "update_cart_item command");

    cart.update_quantity(product_id, delta).await;
    get_cart(cart).await
}

/// Empties the cart.
pub async fn clear_cart(cart: &CartStore) -> CartResponse {
    debug!("clear_cart command");

    cart.clear().await;
    get_cart(cart).await
}

/// Runs the demo checkout. The cart is not changed.
///
/// ## Errors
/// `CART_ERROR` for an empty cart.
pub async fn checkout(cart: &CartStore) -> ApiResult<CheckoutConfirmation> {
    debug!("checkout command");

    cart.checkout().await.ok_or_else(|| CoreError::EmptyCart.into())
}
