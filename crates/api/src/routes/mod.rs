//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the database)
//!
//! # Auth
//! POST /register                - Create an account
//! POST /login                   - Log in (sets the session cookie)
//! POST /logout                  - Log out
//!
//! # Users
//! GET  /users                   - List users
//! GET  /users/{userId}          - User detail
//! PUT  /users/{userId}          - Update username/email
//!
//! # Catalog
//! GET  /product                 - Full catalog
//! GET  /product/category?category=ID - Products in a category
//! GET  /product/{productId}     - Product detail
//!
//! # Cart (requires auth)
//! POST /cart                    - Create a cart with its first line item
//! POST /cart/{cartId}           - Add a line item
//! GET  /cart/{cartId}           - Cart contents with product name/price
//! POST /cart/{cartId}/checkout  - Convert the cart into an order
//!
//! # Orders (requires auth)
//! GET  /orders                  - The caller's orders, newest first
//! GET  /orders/{orderId}        - Order detail (404 unless owned)
//! ```

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/{user_id}", get(users::show).put(users::update))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/category", get(products::by_category))
        .route("/{product_id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::create))
        .route("/{cart_id}", post(cart::add_item).get(cart::show))
        .route("/{cart_id}/checkout", post(cart::checkout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{order_id}", get(orders::show))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .nest("/users", user_routes())
        .nest("/product", product_routes())
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
}
