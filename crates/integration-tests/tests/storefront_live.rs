//! Smoke tests against a running storefront.
//!
//! These tests require the storefront server running
//! (`cargo run -p bazaar-storefront`).

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the storefront (configurable via environment).
fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Client that keeps the session cookie like a browser.
fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_live_health() {
    let resp = browser()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_live_cart_session() {
    let client = browser();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/api/cart/update"))
        .json(&json!({ "product_id": "tee-graphic-black", "quantity": 2 }))
        .send()
        .await
        .expect("Failed to update cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = client
        .get(format!("{base_url}/api/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Cart is JSON");
    assert_eq!(cart["item_count"], 2);

    client
        .post(format!("{base_url}/api/cart/clear"))
        .send()
        .await
        .expect("Failed to clear cart");
}
