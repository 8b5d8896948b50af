//! Cart session flow through the storefront router.

use axum::http::StatusCode;
use bazaar_integration_tests::{TestClient, amount};
use serde_json::json;

const KURTA: &str = "kurta-indigo-handloom";
const TEE: &str = "tee-graphic-black";

#[tokio::test]
async fn test_new_session_has_empty_cart() {
    let mut client = TestClient::new();
    let (status, cart) = client.get("/api/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"], json!([]));
    assert_eq!(cart["item_count"], 0);
    assert!(amount(&cart["total"]["amount"]).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_variants_are_separate_lines() {
    let mut client = TestClient::new();

    let (status, _) = client
        .post(
            "/api/cart/update",
            json!({ "product_id": KURTA, "quantity": 2, "color": "Indigo", "size": "M" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, cart) = client
        .post(
            "/api/cart/update",
            json!({ "product_id": KURTA, "quantity": 1, "color": "Indigo", "size": "L" }),
        )
        .await;
    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(2));
    assert_eq!(cart["item_count"], 3);

    // Adjusting one size leaves the other alone.
    let (_, cart) = client
        .post(
            "/api/cart/update",
            json!({ "product_id": KURTA, "quantity": 4, "color": "Indigo", "size": "M" }),
        )
        .await;
    assert_eq!(cart["lines"][0]["size"], "M");
    assert_eq!(cart["lines"][0]["quantity"], 4);
    assert_eq!(cart["lines"][1]["quantity"], 1);
    assert_eq!(cart["item_count"], 5);
    assert!((amount(&cart["subtotal"]["amount"]) - 6495.0).abs() < 0.001);
}

#[tokio::test]
async fn test_cart_persists_across_requests() {
    let mut client = TestClient::new();
    client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 2 }))
        .await;

    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["lines"][0]["product_id"], TEE);
}

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let mut alice = TestClient::new();
    let mut bob = alice.new_visitor();

    alice
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 1 }))
        .await;

    let (_, cart) = bob.get("/api/cart").await;
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_quantity_zero_removes_line() {
    let mut client = TestClient::new();
    client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 3 }))
        .await;
    let (_, cart) = client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 0 }))
        .await;

    assert_eq!(cart["lines"], json!([]));
}

#[tokio::test]
async fn test_quantity_clamped_to_stock() {
    let mut client = TestClient::new();
    let (_, cart) = client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 100 }))
        .await;

    assert_eq!(cart["lines"][0]["quantity"], 25);
    assert_eq!(cart["lines"][0]["stock"], 25);
}

#[tokio::test]
async fn test_out_of_stock_product_is_not_added() {
    let mut client = TestClient::new();
    let (status, cart) = client
        .post(
            "/api/cart/update",
            json!({ "product_id": "stole-pashmina", "quantity": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"], json!([]));
}

#[tokio::test]
async fn test_unavailable_variant_rejected() {
    let mut client = TestClient::new();
    let (status, body) = client
        .post(
            "/api/cart/update",
            json!({ "product_id": KURTA, "quantity": 1, "size": "XL" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("XL")));
}

#[tokio::test]
async fn test_unknown_product_not_found() {
    let mut client = TestClient::new();
    let (status, _) = client
        .post("/api/cart/update", json!({ "product_id": "nope", "quantity": 1 }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_variant_and_all_variants() {
    let mut client = TestClient::new();
    for size in ["S", "M", "L"] {
        client
            .post(
                "/api/cart/update",
                json!({ "product_id": KURTA, "quantity": 1, "size": size }),
            )
            .await;
    }
    client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 1 }))
        .await;

    let (_, cart) = client
        .post(
            "/api/cart/remove",
            json!({ "product_id": KURTA, "size": "M" }),
        )
        .await;
    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(3));

    let (_, cart) = client
        .post(
            "/api/cart/remove",
            json!({ "product_id": KURTA, "all_variants": true }),
        )
        .await;
    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(1));
    assert_eq!(cart["lines"][0]["product_id"], TEE);
}

#[tokio::test]
async fn test_coupon_apply_reject_and_remove() {
    let mut client = TestClient::new();
    client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 2 }))
        .await;

    let (status, cart) = client
        .post("/api/cart/coupon", json!({ "code": "SAVE10" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["coupon_code"], "SAVE10");
    assert!((amount(&cart["discount"]["amount"]) - 99.8).abs() < 0.001);

    // A bad code is reported and the applied coupon stays.
    let (status, body) = client.post("/api/cart/coupon", json!({ "code": "ab" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid coupon format. Must be 5-10 alphanumeric characters"
    );
    let (status, body) = client
        .post("/api/cart/coupon", json!({ "code": "save10" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid coupon code");
    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["coupon_code"], "SAVE10");

    let (status, cart) = client.delete("/api/cart/coupon").await;
    assert_eq!(status, StatusCode::OK);
    assert!(cart.get("coupon_code").is_none());
}

#[tokio::test]
async fn test_clear_empties_cart_and_coupon() {
    let mut client = TestClient::new();
    client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 2 }))
        .await;
    client
        .post("/api/cart/coupon", json!({ "code": "SAVE10" }))
        .await;

    let (status, cart) = client.post("/api/cart/clear", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["item_count"], 0);
    assert!(cart.get("coupon_code").is_none());
}

#[tokio::test]
async fn test_malformed_update_is_json_bad_request() {
    let mut client = TestClient::new();

    let (status, body) = client
        .post(
            "/api/cart/update",
            json!({ "product_id": TEE, "quantity": -1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body.get("errors").is_none());

    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["item_count"], 0);
}
