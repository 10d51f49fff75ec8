//! Order repository.
//!
//! Orders are append-only: the two write operations run only inside the
//! checkout transaction, and nothing in the codebase updates or deletes an
//! order row after commit.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use clementine_core::{OrderId, Price, UserId};

use super::RepositoryError;
use crate::models::{Order, PricedCartLine};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_price, created_at
            FROM shop.orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Ownership-scoped order lookup.
    ///
    /// Returns `None` both for a nonexistent order and for one belonging to
    /// another user; callers answer 404 either way, so order IDs cannot be
    /// probed for existence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_price, created_at
            FROM shop.orders
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    // =========================================================================
    // Transaction-scoped operations (used by checkout)
    // =========================================================================

    /// Insert a new order row with the computed total.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: UserId,
        total_price: Price,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO shop.orders (user_id, total_price)
            VALUES ($1, $2)
            RETURNING id, user_id, total_price, created_at
            ",
        )
        .bind(user_id)
        .bind(total_price)
        .fetch_one(&mut *conn)
        .await?;

        Ok(order)
    }

    /// Bulk-insert the order's line items with their snapshotted prices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_items(
        conn: &mut PgConnection,
        order_id: OrderId,
        items: &[PricedCartLine],
    ) -> Result<(), RepositoryError> {
        let product_ids: Vec<i32> = items.iter().map(|i| i.product_id.as_i32()).collect();
        let quantities: Vec<i32> = items.iter().map(|i| i.quantity).collect();
        let prices: Vec<Decimal> = items.iter().map(|i| i.price.amount()).collect();

        sqlx::query(
            r"
            INSERT INTO shop.order_items (order_id, product_id, quantity, price)
            SELECT $1, u.product_id, u.quantity, u.price
            FROM UNNEST($2::int4[], $3::int4[], $4::numeric[]) AS u(product_id, quantity, price)
            ",
        )
        .bind(order_id)
        .bind(&product_ids)
        .bind(&quantities)
        .bind(&prices)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
