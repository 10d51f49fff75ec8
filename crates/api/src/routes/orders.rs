//! Order route handlers.
//!
//! Reads only; orders are created exclusively by checkout.

use axum::{
    Json,
    extract::{Path, State},
};

use clementine_core::OrderId;

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::state::AppState;

/// List the caller's orders, newest first.
///
/// GET /orders
///
/// # Errors
///
/// 500 on database failure.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// Look up one of the caller's orders.
///
/// GET /orders/{orderId}
///
/// # Errors
///
/// 404 if the order does not exist or belongs to another user; the response
/// is identical in both cases.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(order_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    Ok(Json(order))
}
