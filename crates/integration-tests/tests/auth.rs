//! Integration tests for registration, login, and session handling.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p clementine-api)
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

mod common;

use serde_json::{Value, json};

use common::{base_url, client, fresh_username, register_and_login};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn register_returns_user_without_password_hash() {
    let client = client();
    let username = fresh_username();

    let resp = client
        .post(format!("{}/register", base_url()))
        .json(&json!({
            "username": username,
            "password": "integration-test-pass",
            "email": format!("{username}@example.com"),
        }))
        .send()
        .await
        .expect("register failed");

    assert_eq!(resp.status(), 201);
    let user: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(user["username"], username.as_str());
    assert!(user.get("password_hash").is_none(), "hash must not leak");
    assert!(user.get("password").is_none());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn register_missing_fields_is_400() {
    let client = client();

    let resp = client
        .post(format!("{}/register", base_url()))
        .json(&json!({ "username": "incomplete" }))
        .send()
        .await
        .expect("register failed");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn register_duplicate_username_is_409() {
    let client = client();
    let username = fresh_username();
    let body = json!({
        "username": username,
        "password": "integration-test-pass",
        "email": format!("{username}@example.com"),
    });

    let first = client
        .post(format!("{}/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("register failed");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("register failed");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn login_with_wrong_password_is_401() {
    let client = client();
    let username = register_and_login(&client).await;

    let resp = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "username": username, "password": "not-the-password" }))
        .send()
        .await
        .expect("login failed");

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn logout_drops_the_session() {
    let client = client();
    register_and_login(&client).await;

    let before = client
        .get(format!("{}/orders", base_url()))
        .send()
        .await
        .expect("orders failed");
    assert_eq!(before.status(), 200);

    let logout = client
        .post(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("logout failed");
    assert_eq!(logout.status(), 204);

    let after = client
        .get(format!("{}/orders", base_url()))
        .send()
        .await
        .expect("orders failed");
    assert_eq!(after.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn unauthenticated_cart_access_is_401() {
    let client = client();

    let resp = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "product_id": 1, "quantity": 1 }))
        .send()
        .await
        .expect("cart create failed");

    assert_eq!(resp.status(), 401);
}
