//! Database operations for the shop `PostgreSQL` schema.
//!
//! # Tables (`shop` schema)
//!
//! - `users` - Registered users (username, password hash, email)
//! - `categories` / `products` - Read-only catalog, seeded via the CLI
//! - `carts` / `cart_items` - Mutable pending purchases
//! - `orders` / `order_items` - Append-only checkout results
//!
//! The tower-sessions store table lives in its own `tower_sessions` schema.
//!
//! All queries use the runtime-checked sqlx API (`query`, `query_as`,
//! `query_scalar`), so the workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p clementine-cli -- migrate
//! ```

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found (or not owned by the caller).
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username, unknown product).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
