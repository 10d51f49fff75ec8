//! Integration tests for order listing and ownership-scoped lookup.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and the
//!   sample catalog seeded
//! - The API server running (cargo run -p clementine-api)
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

mod common;

use serde_json::Value;

use common::{base_url, client, create_cart_with, find_product, register_and_login};

/// Check out a one-line cart and return the new order's id.
async fn place_order(client: &reqwest::Client) -> i64 {
    let (crate_id, _) = find_product(client, "Clementine Crate").await;
    let cart_id = create_cart_with(client, crate_id, 1).await;

    let resp = client
        .post(format!("{}/cart/{cart_id}/checkout", base_url()))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.expect("invalid checkout JSON");
    body["order"]["id"].as_i64().expect("order id")
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn orders_list_newest_first() {
    let client = client();
    register_and_login(&client).await;

    let first = place_order(&client).await;
    let second = place_order(&client).await;

    let orders: Vec<Value> = client
        .get(format!("{}/orders", base_url()))
        .send()
        .await
        .expect("orders failed")
        .json()
        .await
        .expect("invalid orders JSON");

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"].as_i64(), Some(second));
    assert_eq!(orders[1]["id"].as_i64(), Some(first));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn order_detail_roundtrips() {
    let client = client();
    register_and_login(&client).await;

    let order_id = place_order(&client).await;

    let resp = client
        .get(format!("{}/orders/{order_id}", base_url()))
        .send()
        .await
        .expect("order detail failed");
    assert_eq!(resp.status(), 200);

    let order: Value = resp.json().await.expect("invalid order JSON");
    assert_eq!(order["id"].as_i64(), Some(order_id));
    assert_eq!(order["total_price"], "10.00");
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn foreign_order_is_404_not_403() {
    let owner = client();
    register_and_login(&owner).await;
    let order_id = place_order(&owner).await;

    let stranger = client();
    register_and_login(&stranger).await;

    let resp = stranger
        .get(format!("{}/orders/{order_id}", base_url()))
        .send()
        .await
        .expect("order detail failed");
    assert_eq!(resp.status(), 404, "ownership miss must read as not-found");

    // Identical response shape for an id that does not exist at all
    let missing = stranger
        .get(format!("{}/orders/999999999", base_url()))
        .send()
        .await
        .expect("order detail failed");
    assert_eq!(missing.status(), 404);
}
