//! Checkout validation and order placement through the storefront router.

use axum::http::StatusCode;
use bazaar_integration_tests::{StubGateway, TestClient, amount, valid_form};
use serde_json::json;

const TEE: &str = "tee-graphic-black";

async fn client_with_tee(gateway: StubGateway) -> TestClient {
    let mut client = TestClient::with_gateway(gateway);
    client
        .post("/api/cart/update", json!({ "product_id": TEE, "quantity": 1 }))
        .await;
    client
}

#[tokio::test]
async fn test_validate_blank_form() {
    let mut client = TestClient::new();
    let (status, body) = client.post("/api/checkout/validate", json!({})).await;

    // Country defaults to IN on both addresses; everything else is missing.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"].as_object().map(serde_json::Map::len), Some(14));
    assert_eq!(body["errors"]["shippingName"], "Name is required");
    assert_eq!(body["errors"]["billingPincode"], "Invalid pincode");
}

#[tokio::test]
async fn test_validate_single_field() {
    let mut client = TestClient::new();
    let (_, body) = client
        .post(
            "/api/checkout/validate",
            json!({ "field": "shippingEmail", "shipping": { "email": "a@b" } }),
        )
        .await;

    assert_eq!(body["errors"], json!({ "shippingEmail": "Invalid email address" }));

    let (_, body) = client
        .post(
            "/api/checkout/validate",
            json!({ "field": "shippingEmail", "shipping": { "email": "a@b.com" } }),
        )
        .await;
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_validate_valid_form() {
    let mut client = TestClient::new();
    let (_, body) = client
        .post("/api/checkout/validate", valid_form("cash_on_delivery"))
        .await;

    assert_eq!(body["valid"], true);
    assert_eq!(body["errors"], json!({}));
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let mut client = TestClient::new();
    let (status, body) = client
        .post("/api/checkout", valid_form("cash_on_delivery"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Your cart is empty");
}

#[tokio::test]
async fn test_checkout_invalid_form_keeps_cart() {
    let mut client = client_with_tee(StubGateway::default()).await;
    let mut form = valid_form("cash_on_delivery");
    form["shipping"]["phone"] = json!("0123456789");

    let (status, body) = client.post("/api/checkout", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["shippingPhone"], "Invalid phone number");
    assert_eq!(body["errors"]["billingPhone"], "Invalid phone number");

    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["item_count"], 1);
}

#[tokio::test]
async fn test_unknown_payment_method_is_bad_request() {
    let mut client = client_with_tee(StubGateway::default()).await;

    let (status, body) = client.post("/api/checkout", valid_form("barter")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(client.gateway.requests().is_empty());

    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["item_count"], 1);
}

#[tokio::test]
async fn test_cash_on_delivery_places_order_and_clears_cart() {
    let mut client = client_with_tee(StubGateway::default()).await;

    let (status, body) = client
        .post("/api/checkout", valid_form("cash_on_delivery"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "placed");
    assert!(body["order_number"].as_str().is_some_and(|n| n.len() == 36));
    assert!((amount(&body["summary"]["total"]["amount"]) - 588.82).abs() < 0.001);

    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["item_count"], 0);
    assert!(client.gateway.requests().is_empty());
}

#[tokio::test]
async fn test_online_payment_opens_gateway_order() {
    let mut client = client_with_tee(StubGateway::default()).await;

    let (status, body) = client.post("/api/checkout", valid_form("online")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "awaiting_payment");
    assert_eq!(body["reference"], "order_stub_1");
    assert_eq!(body["prefill"]["contact"], "9123456789");

    // 499 + 18% GST = 588.82 rupees
    let requests = client.gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests.first().map(|r| r.amount_minor), Some(58_882));

    // Cart stays until payment completes
    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["item_count"], 1);
}

#[tokio::test]
async fn test_gateway_failure_reported_as_bad_gateway() {
    let mut client = client_with_tee(StubGateway::failing()).await;

    let (status, body) = client.post("/api/checkout", valid_form("online")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to create order");

    let (_, cart) = client.get("/api/cart").await;
    assert_eq!(cart["item_count"], 1);
}

#[tokio::test]
async fn test_create_order_in_paise() {
    let mut client = TestClient::new();

    let (status, body) = client
        .post("/api/create-order", json!({ "amount": 1299.5 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], "order_stub_1");
    assert_eq!(
        client.gateway.requests().first().map(|r| r.amount_minor),
        Some(129_950)
    );

    let (status, _) = client.post("/api/create-order", json!({ "amount": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_order_amount_too_large() {
    let mut client = TestClient::new();

    let (status, body) = client
        .post(
            "/api/create-order",
            json!({ "amount": "79228162514264337593543950335" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid amount");
    assert!(client.gateway.requests().is_empty());
}
