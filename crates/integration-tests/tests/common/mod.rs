//! Shared helpers for the HTTP-level tests.
//!
//! These assume a running API (`API_BASE_URL`, default localhost:4000) with
//! a migrated, seeded database behind it.

#![allow(dead_code)] // not every test file uses every helper

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// A client with a cookie jar, so the session survives across requests.
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique username that fits the 32-character limit.
pub fn fresh_username() -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!("user-{}", tag.get(..20).unwrap_or(&tag))
}

/// Register a fresh user and log the client in. Returns the username.
pub async fn register_and_login(client: &Client) -> String {
    let username = fresh_username();
    let base = base_url();

    let resp = client
        .post(format!("{base}/register"))
        .json(&json!({
            "username": username,
            "password": "integration-test-pass",
            "email": format!("{username}@example.com"),
        }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201, "register should succeed");

    let resp = client
        .post(format!("{base}/login"))
        .json(&json!({
            "username": username,
            "password": "integration-test-pass",
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 200, "login should succeed");

    username
}

/// Find a seeded product by name. Returns (id, price-as-string).
pub async fn find_product(client: &Client, name: &str) -> (i64, String) {
    let resp = client
        .get(format!("{}/product", base_url()))
        .send()
        .await
        .expect("product listing failed");
    assert_eq!(resp.status(), 200);

    let products: Vec<Value> = resp.json().await.expect("invalid product JSON");
    let product = products
        .iter()
        .find(|p| p["name"] == name)
        .unwrap_or_else(|| panic!("seeded product {name} not found; run clementine-cli seed"));

    (
        product["id"].as_i64().expect("product id"),
        product["price"].as_str().expect("product price").to_owned(),
    )
}

/// Create a cart holding `quantity` of `product_id`. Returns the cart id.
pub async fn create_cart_with(client: &Client, product_id: i64, quantity: i64) -> i64 {
    let resp = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("cart create failed");
    assert_eq!(resp.status(), 201, "cart create should succeed");

    let cart: Value = resp.json().await.expect("invalid cart JSON");
    cart["id"].as_i64().expect("cart id")
}

/// Add a line item to an existing cart.
pub async fn add_item(client: &Client, cart_id: i64, product_id: i64, quantity: i64) {
    let resp = client
        .post(format!("{}/cart/{cart_id}", base_url()))
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("add item failed");
    assert_eq!(resp.status(), 201, "add item should succeed");
}
