//! Catalog domain types.
//!
//! Products are read-only from the API's perspective: rows are created by
//! the CLI seeder (or an external catalog pipeline), and `price` is the
//! authoritative unit price read fresh at checkout time.

use serde::Serialize;

use clementine_core::{CategoryId, Price, ProductId};

/// A purchasable product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub price: Price,
    /// Category this product belongs to.
    pub category_id: CategoryId,
}
