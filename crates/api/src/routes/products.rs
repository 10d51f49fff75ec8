//! Catalog route handlers (read-only).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use clementine_core::{CategoryId, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for category filtering.
///
/// `category` is taken as a raw string so a non-numeric value is a 400, not
/// a rejection from the query extractor.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// List the whole catalog.
///
/// GET /product
///
/// # Errors
///
/// 500 on database failure.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// List products in a category.
///
/// GET /product/category?category=ID
///
/// # Errors
///
/// 400 for a missing or non-numeric category ID, 404 if the category has no
/// products.
pub async fn by_category(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<Product>>> {
    let category_id = query
        .category
        .as_deref()
        .and_then(|raw| raw.parse::<i32>().ok())
        .map(CategoryId::new)
        .ok_or_else(|| AppError::BadRequest("Please provide a category ID".to_owned()))?;

    let products = ProductRepository::new(state.pool())
        .list_by_category(category_id)
        .await?;

    if products.is_empty() {
        return Err(AppError::NotFound(
            "No products found for this category".to_owned(),
        ));
    }

    Ok(Json(products))
}

/// Look up a product by ID.
///
/// GET /product/{productId}
///
/// # Errors
///
/// 404 if no such product exists.
pub async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}
