//! Order domain types.
//!
//! Orders and their items are append-only: once checkout commits them they
//! are never mutated or deleted. An order's `total_price` always equals the
//! sum of its items' `price x quantity`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use clementine_core::{OrderId, Price, ProductId, UserId};

/// A completed order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User the order belongs to.
    pub user_id: UserId,
    /// Exact total at checkout time.
    pub total_price: Price,
    /// When checkout committed.
    pub created_at: DateTime<Utc>,
}

/// A line item frozen into an order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    /// Order this line belongs to.
    pub order_id: OrderId,
    /// Product that was purchased.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i32,
    /// Unit price captured at checkout time, decoupled from later catalog
    /// price changes.
    pub price: Price,
}

/// What checkout returns to the client.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    /// The new order's ID.
    pub id: OrderId,
    /// Exact order total.
    pub total_price: Price,
    /// When checkout committed.
    pub created_at: DateTime<Utc>,
}
