//! Cart route handlers, including checkout.
//!
//! Every endpoint here requires a session. Any access to a cart that is
//! missing or owned by someone else answers 404 with no distinction between
//! the two cases.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use clementine_core::{CartId, ProductId};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Cart, CartItem, CartItemView, OrderSummary};
use crate::services::CheckoutService;
use crate::state::AppState;

/// Request body for creating a cart or adding a line item.
#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: OrderSummary,
}

impl LineItemRequest {
    /// Validate presence and positivity before any storage call.
    fn validate(self) -> Result<(ProductId, i32)> {
        let (Some(product_id), Some(quantity)) = (self.product_id, self.quantity) else {
            return Err(AppError::BadRequest(
                "Please provide a product_id and quantity".to_owned(),
            ));
        };

        if product_id <= 0 || quantity <= 0 {
            return Err(AppError::BadRequest(
                "product_id and quantity must be positive".to_owned(),
            ));
        }

        Ok((ProductId::new(product_id), quantity))
    }
}

/// Create a cart holding the given first line item.
///
/// POST /cart
///
/// # Errors
///
/// 400 for missing/non-positive fields or an unknown product.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<LineItemRequest>,
) -> Result<(StatusCode, Json<Cart>)> {
    let (product_id, quantity) = body.validate()?;

    let cart = CartRepository::new(state.pool())
        .create_with_item(user.id, product_id, quantity)
        .await
        .map_err(unknown_product_to_bad_request)?;

    Ok((StatusCode::CREATED, Json(cart)))
}

/// Add a line item to an existing cart.
///
/// POST /cart/{cartId}
///
/// # Errors
///
/// 400 for missing/non-positive fields or an unknown product, 404 if the
/// cart is missing or not owned by the caller.
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(cart_id): Path<CartId>,
    Json(body): Json<LineItemRequest>,
) -> Result<(StatusCode, Json<CartItem>)> {
    let (product_id, quantity) = body.validate()?;

    let item = CartRepository::new(state.pool())
        .add_item(cart_id, user.id, product_id, quantity)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Cart not found".to_owned()),
            other => unknown_product_to_bad_request(other),
        })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Read a cart's contents with product names and current prices.
///
/// GET /cart/{cartId}
///
/// # Errors
///
/// 404 if the cart is missing, not owned by the caller, or empty.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(cart_id): Path<CartId>,
) -> Result<Json<Vec<CartItemView>>> {
    let items = CartRepository::new(state.pool())
        .items_with_products(cart_id, user.id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Cart not found".to_owned()),
            other => AppError::Database(other),
        })?;

    if items.is_empty() {
        return Err(AppError::NotFound("Cart is empty".to_owned()));
    }

    Ok(Json(items))
}

/// Convert the cart into an order and clear it.
///
/// POST /cart/{cartId}/checkout
///
/// # Errors
///
/// 404 if the cart is missing or not owned by the caller, 400 if it is
/// empty (including when a concurrent checkout got there first), 500 if the
/// transaction fails (nothing is committed in that case).
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(cart_id): Path<CartId>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let order = CheckoutService::new(state.pool())
        .checkout(cart_id, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse { order })))
}

/// An unknown product surfaces as a validation failure, not a server error.
fn unknown_product_to_bad_request(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
        other => AppError::Database(other),
    }
}
