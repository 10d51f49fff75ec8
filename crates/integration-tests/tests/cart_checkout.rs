//! Integration tests for cart mutation and checkout.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and the
//!   sample catalog seeded (clementine-cli migrate && clementine-cli seed)
//! - The API server running (cargo run -p clementine-api)
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

mod common;

use serde_json::{Value, json};

use common::{add_item, base_url, client, create_cart_with, find_product, register_and_login};

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn checkout_totals_exactly_and_clears_the_cart() {
    let client = client();
    register_and_login(&client).await;

    // Seeded prices: Clementine Crate 10.00, Honey Jar 5.50
    let (crate_id, crate_price) = find_product(&client, "Clementine Crate").await;
    let (honey_id, honey_price) = find_product(&client, "Honey Jar").await;
    assert_eq!(crate_price, "10.00");
    assert_eq!(honey_price, "5.50");

    let cart_id = create_cart_with(&client, crate_id, 2).await;
    add_item(&client, cart_id, honey_id, 1).await;

    // Cart view shows both lines with live name and price
    let view = client
        .get(format!("{}/cart/{cart_id}", base_url()))
        .send()
        .await
        .expect("cart view failed");
    assert_eq!(view.status(), 200);
    let items: Vec<Value> = view.json().await.expect("invalid cart JSON");
    assert_eq!(items.len(), 2);

    // 10.00 x 2 + 5.50 x 1 = 25.50
    let resp = client
        .post(format!("{}/cart/{cart_id}/checkout", base_url()))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.expect("invalid checkout JSON");
    assert_eq!(body["order"]["total_price"], "25.50");
    assert!(body["order"]["id"].is_i64());
    assert!(body["order"]["created_at"].is_string());

    // The cart survives but is empty, surfaced as 404
    let emptied = client
        .get(format!("{}/cart/{cart_id}", base_url()))
        .send()
        .await
        .expect("cart view failed");
    assert_eq!(emptied.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn checkout_twice_fails_with_empty_cart_and_creates_no_second_order() {
    let client = client();
    register_and_login(&client).await;

    let (crate_id, _) = find_product(&client, "Clementine Crate").await;
    let cart_id = create_cart_with(&client, crate_id, 1).await;

    let first = client
        .post(format!("{}/cart/{cart_id}/checkout", base_url()))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(first.status(), 201);

    let orders_after_first: Vec<Value> = client
        .get(format!("{}/orders", base_url()))
        .send()
        .await
        .expect("orders failed")
        .json()
        .await
        .expect("invalid orders JSON");

    let second = client
        .post(format!("{}/cart/{cart_id}/checkout", base_url()))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(second.status(), 400, "already-cleared cart is an empty cart");

    let orders_after_second: Vec<Value> = client
        .get(format!("{}/orders", base_url()))
        .send()
        .await
        .expect("orders failed")
        .json()
        .await
        .expect("invalid orders JSON");
    assert_eq!(orders_after_first.len(), orders_after_second.len());
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn concurrent_checkouts_produce_exactly_one_order() {
    let client = client();
    register_and_login(&client).await;

    let (crate_id, _) = find_product(&client, "Clementine Crate").await;
    let cart_id = create_cart_with(&client, crate_id, 1).await;

    let url = format!("{}/cart/{cart_id}/checkout", base_url());
    let (a, b) = tokio::join!(client.post(&url).send(), client.post(&url).send());
    let (a, b) = (a.expect("checkout failed"), b.expect("checkout failed"));

    let statuses = {
        let mut s = vec![a.status().as_u16(), b.status().as_u16()];
        s.sort_unstable();
        s
    };
    assert_eq!(statuses, vec![201, 400], "one winner, one empty-cart loser");
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn foreign_cart_is_indistinguishable_from_missing() {
    let owner = client();
    register_and_login(&owner).await;
    let (crate_id, _) = find_product(&owner, "Clementine Crate").await;
    let cart_id = create_cart_with(&owner, crate_id, 1).await;

    let stranger = client();
    register_and_login(&stranger).await;

    let view = stranger
        .get(format!("{}/cart/{cart_id}", base_url()))
        .send()
        .await
        .expect("cart view failed");
    assert_eq!(view.status(), 404);

    let add = stranger
        .post(format!("{}/cart/{cart_id}", base_url()))
        .json(&json!({ "product_id": crate_id, "quantity": 1 }))
        .send()
        .await
        .expect("add item failed");
    assert_eq!(add.status(), 404);

    let checkout = stranger
        .post(format!("{}/cart/{cart_id}/checkout", base_url()))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(checkout.status(), 404);

    // A cart id that does not exist at all answers the same way
    let missing = stranger
        .get(format!("{}/cart/999999999", base_url()))
        .send()
        .await
        .expect("cart view failed");
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn cart_create_validates_fields() {
    let client = client();
    register_and_login(&client).await;

    let missing = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "product_id": 1 }))
        .send()
        .await
        .expect("cart create failed");
    assert_eq!(missing.status(), 400);

    let non_positive = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "product_id": 1, "quantity": 0 }))
        .send()
        .await
        .expect("cart create failed");
    assert_eq!(non_positive.status(), 400);

    let unknown_product = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "product_id": 999999999, "quantity": 1 }))
        .send()
        .await
        .expect("cart create failed");
    assert_eq!(unknown_product.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server, seeded database, and CLEMENTINE_DATABASE_URL"]
async fn order_items_carry_the_snapshotted_price() {
    let database_url = std::env::var("CLEMENTINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("set CLEMENTINE_DATABASE_URL for this test");

    let client = client();
    register_and_login(&client).await;

    let (crate_id, _) = find_product(&client, "Clementine Crate").await;
    let (honey_id, _) = find_product(&client, "Honey Jar").await;
    let cart_id = create_cart_with(&client, crate_id, 2).await;
    add_item(&client, cart_id, honey_id, 1).await;

    let resp = client
        .post(format!("{}/cart/{cart_id}/checkout", base_url()))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.expect("invalid checkout JSON");
    let order_id = body["order"]["id"].as_i64().expect("order id");

    // The stored items must reproduce the total exactly, and stay put even
    // if the catalog price changes afterwards.
    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("db connect failed");

    let (item_count, items_total): (i64, sqlx::types::Decimal) = sqlx::query_as(
        "SELECT count(*), coalesce(sum(price * quantity), 0)
         FROM shop.order_items WHERE order_id = $1",
    )
    .bind(i32::try_from(order_id).expect("order id fits i32"))
    .fetch_one(&pool)
    .await
    .expect("order items query failed");

    assert_eq!(item_count, 2);
    assert_eq!(items_total.to_string(), "25.50");
    assert_eq!(body["order"]["total_price"], "25.50");
}
