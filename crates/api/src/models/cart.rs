//! Cart domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use clementine_core::{CartId, CartItemId, Price, ProductId, UserId};

/// A user's shopping cart.
///
/// A user may hold several carts; each belongs to exactly one user and
/// survives checkout (only its line items are cleared).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
}

/// A single line item in a cart.
///
/// Repeated adds of the same product create separate rows; lines are never
/// merged.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItem {
    /// Unique line-item ID.
    pub id: CartItemId,
    /// Cart this line belongs to.
    pub cart_id: CartId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Number of units; always positive.
    pub quantity: i32,
}

/// A cart line joined with the current catalog price, as loaded (and locked)
/// inside the checkout transaction.
///
/// The `price` read here is the snapshot frozen into the order items; it is
/// never re-read after this point.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PricedCartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i32,
    /// Current unit price at the moment the line was locked.
    pub price: Price,
}

/// A cart line item joined with its product's name and current price.
///
/// This is a read view; the price shown here is the live catalog price, not
/// a captured one.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItemView {
    /// Line-item ID.
    pub id: CartItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i32,
    /// Product display name.
    pub name: String,
    /// Current unit price of the product.
    pub price: Price,
}
