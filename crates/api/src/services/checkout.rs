//! Checkout: the atomic conversion of a cart into an immutable order.
//!
//! Checkout is the only multi-entity write path in the system. Everything it
//! does happens inside one database transaction:
//!
//! 1. verify the cart belongs to the caller,
//! 2. lock and load the cart's line items joined with current prices,
//! 3. compute the exact total,
//! 4. insert the order row and its line items (prices frozen from step 2),
//! 5. clear the cart's line items.
//!
//! Either all of it commits or none of it does; an error anywhere rolls the
//! transaction back, so a half-created order can never be observed. The row
//! locks taken in step 2 serialize duplicate concurrent checkouts of one
//! cart: the loser blocks, then finds the cart empty and fails without
//! creating a second order.

use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{CartId, Price, UserId};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::orders::OrderRepository;
use crate::models::{OrderSummary, PricedCartLine};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart does not exist or belongs to another user. The two cases
    /// are indistinguishable to the caller.
    #[error("cart not found")]
    CartNotFound,

    /// The cart has no line items (possibly because a concurrent checkout
    /// already converted it).
    #[error("cart is empty")]
    EmptyCart,

    /// A storage operation failed; the transaction was rolled back.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The checkout engine.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert the cart's contents into an order and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::CartNotFound` if the cart does not exist or
    /// is not owned by `user_id`.
    /// Returns `CheckoutError::EmptyCart` if the cart has no line items.
    /// Returns `CheckoutError::Repository` if any storage operation fails;
    /// in that case no order exists and the cart is untouched.
    pub async fn checkout(
        &self,
        cart_id: CartId,
        user_id: UserId,
    ) -> Result<OrderSummary, CheckoutError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::Database)?;

        if !CartRepository::owned_by(&mut tx, cart_id, user_id).await? {
            return Err(CheckoutError::CartNotFound);
        }

        // Lock the line items and read prices fresh inside the transaction.
        // These rows are the snapshot the order is built from.
        let lines = CartRepository::lock_line_items(&mut tx, cart_id).await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total_price = order_total(&lines);

        let order = OrderRepository::create(&mut tx, user_id, total_price).await?;
        OrderRepository::add_items(&mut tx, order.id, &lines).await?;
        CartRepository::clear_items(&mut tx, cart_id).await?;

        tx.commit().await.map_err(RepositoryError::Database)?;

        tracing::info!(
            order_id = %order.id,
            cart_id = %cart_id,
            total = %order.total_price,
            lines = lines.len(),
            "Checkout committed"
        );

        Ok(OrderSummary {
            id: order.id,
            total_price: order.total_price,
            created_at: order.created_at,
        })
    }
}

/// Exact order total: the sum of unit price times quantity over all lines.
///
/// Decimal arithmetic throughout; a long cart accumulates no rounding error,
/// so the stored `total_price` always equals the sum of the stored items.
fn order_total(lines: &[PricedCartLine]) -> Price {
    lines
        .iter()
        .map(|line| line.price.line_total(line.quantity))
        .sum()
}
