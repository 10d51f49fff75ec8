//! Cart repository: cart creation, line-item mutation, and the
//! transaction-scoped reads checkout builds on.
//!
//! Every read or write that touches another user's cart behaves exactly as
//! if the cart did not exist, so callers cannot probe for foreign cart IDs.

use sqlx::{PgConnection, PgPool};

use clementine_core::{CartId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem, CartItemView, PricedCartLine};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a fresh, empty cart for a user.
    ///
    /// Always succeeds for an existing user; users may hold any number of
    /// carts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(
            r"
            INSERT INTO shop.carts (user_id)
            VALUES ($1)
            RETURNING id, user_id, created_at
            ",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(cart)
    }

    /// Create a cart holding one initial line item, in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Cart, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart = sqlx::query_as::<_, Cart>(
            r"
            INSERT INTO shop.carts (user_id)
            VALUES ($1)
            RETURNING id, user_id, created_at
            ",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO shop.cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(cart.id)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(map_product_fk)?;

        tx.commit().await?;

        Ok(cart)
    }

    /// Add a line item to a cart the user owns.
    ///
    /// Adding the same product twice creates two separate lines; no merging.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart does not exist or
    /// belongs to another user.
    /// Returns `RepositoryError::Conflict` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        cart_id: CartId,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        // Ownership-scoped insert: the SELECT yields no row for a missing or
        // foreign cart, so the insert affects nothing and we report NotFound.
        let item = sqlx::query_as::<_, CartItem>(
            r"
            INSERT INTO shop.cart_items (cart_id, product_id, quantity)
            SELECT c.id, $3, $4
            FROM shop.carts c
            WHERE c.id = $1 AND c.user_id = $2
            RETURNING id, cart_id, product_id, quantity
            ",
        )
        .bind(cart_id)
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await
        .map_err(map_product_fk)?;

        item.ok_or(RepositoryError::NotFound)
    }

    /// Read a cart's line items joined with product name and current price.
    ///
    /// An empty cart yields `Ok(vec![])`; the caller decides how to surface
    /// emptiness.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart does not exist or
    /// belongs to another user.
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn items_with_products(
        &self,
        cart_id: CartId,
        user_id: UserId,
    ) -> Result<Vec<CartItemView>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;

        if !Self::owned_by(&mut conn, cart_id, user_id).await? {
            return Err(RepositoryError::NotFound);
        }

        let items = sqlx::query_as::<_, CartItemView>(
            r"
            SELECT ci.id, ci.product_id, ci.quantity, p.name, p.price
            FROM shop.cart_items ci
            JOIN shop.products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id ASC
            ",
        )
        .bind(cart_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(items)
    }

    // =========================================================================
    // Transaction-scoped operations (used by checkout)
    // =========================================================================

    /// Whether the cart exists and belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn owned_by(
        conn: &mut PgConnection,
        cart_id: CartId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let found: Option<i32> = sqlx::query_scalar(
            r"
            SELECT 1
            FROM shop.carts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(cart_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(found.is_some())
    }

    /// Load the cart's line items joined with the current catalog price,
    /// taking row locks on the line items.
    ///
    /// The locks serialize concurrent checkouts of the same cart: a second
    /// caller blocks here until the first commits, then observes the cleared
    /// cart. The returned prices are the snapshot frozen into the order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lock_line_items(
        conn: &mut PgConnection,
        cart_id: CartId,
    ) -> Result<Vec<PricedCartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, PricedCartLine>(
            r"
            SELECT ci.product_id, ci.quantity, p.price
            FROM shop.cart_items ci
            JOIN shop.products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id ASC
            FOR UPDATE OF ci
            ",
        )
        .bind(cart_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(lines)
    }

    /// Delete all of a cart's line items. Idempotent; the cart row stays.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear_items(
        conn: &mut PgConnection,
        cart_id: CartId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_items
            WHERE cart_id = $1
            ",
        )
        .bind(cart_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Map a foreign-key violation on `cart_items.product_id` to `Conflict` so
/// routes can answer 400 for an unknown product instead of 500.
fn map_product_fk(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict("product does not exist".to_owned());
    }
    RepositoryError::Database(e)
}
