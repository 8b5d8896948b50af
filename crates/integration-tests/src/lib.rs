//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no server needed)
//! cargo test -p bazaar-integration-tests
//!
//! # Tests against a running storefront
//! cargo test -p bazaar-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart session flow through the router
//! - `storefront_checkout` - Validation, cash on delivery and online checkout
//! - `storefront_catalog` - Product listing, search and location lookups
//! - `storefront_live` - Smoke tests against a running server (ignored)
//!
//! In-process tests drive [`bazaar_storefront::app`] with
//! `tower::ServiceExt::oneshot`, carrying the session cookie between
//! requests the way a browser would.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use bazaar_core::{Catalog, OrderReference, PaymentError, PaymentGateway, PaymentRequest};
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::services::load_catalog;
use bazaar_storefront::{AppState, app};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

/// Gateway that records requests and hands out sequential order ids.
#[derive(Debug, Default)]
pub struct StubGateway {
    requests: Mutex<Vec<PaymentRequest>>,
    fail: bool,
}

impl StubGateway {
    /// A gateway whose every call fails with an API error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the lock was poisoned by a panicking test.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(&self, request: PaymentRequest) -> Result<OrderReference, PaymentError> {
        if self.fail {
            return Err(PaymentError::Api {
                status: 502,
                message: "stub gateway failure".to_string(),
            });
        }
        let mut requests = self
            .requests
            .lock()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;
        requests.push(request);
        Ok(OrderReference(format!("order_stub_{}", requests.len())))
    }
}

/// The bundled sample catalog.
///
/// # Panics
///
/// Panics if the sample catalog is missing or invalid.
#[must_use]
pub fn sample_catalog() -> Catalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/data/products.json");
    load_catalog(&path).expect("sample catalog should load")
}

/// One simulated browser: the app plus its session cookie.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
    pub gateway: Arc<StubGateway>,
}

impl TestClient {
    /// Client for a storefront with the sample catalog and a working gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::with_gateway(StubGateway::default())
    }

    /// Client for a storefront with the sample catalog and `gateway`.
    ///
    /// # Panics
    ///
    /// Panics if the sample catalog cannot be loaded.
    #[must_use]
    pub fn with_gateway(gateway: StubGateway) -> Self {
        let base_url = Url::parse("http://localhost:3000").expect("static URL");
        let gateway = Arc::new(gateway);
        let state = AppState::new(
            StorefrontConfig::local(base_url),
            sample_catalog(),
            gateway.clone(),
        );

        Self {
            app: app(state),
            cookie: None,
            gateway,
        }
    }

    /// A second visitor on the same server, with no session yet.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
            gateway: self.gateway.clone(),
        }
    }

    /// `GET` a path, returning status and JSON body (`Null` if not JSON).
    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    /// `POST` a JSON body.
    pub async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// `DELETE` a path.
    pub async fn delete(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send a request, keeping any session cookie the response sets.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_owned());
        }

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric value of a serialized decimal (prices are sent as strings).
///
/// # Panics
///
/// Panics if `value` is neither a numeric string nor a number.
#[must_use]
pub fn amount(value: &Value) -> f64 {
    value
        .as_str()
        .map_or_else(|| value.as_f64(), |s| s.parse().ok())
        .expect("decimal value")
}

/// A complete, valid checkout form for a Bangalore address.
#[must_use]
pub fn valid_form(payment_method: &str) -> Value {
    serde_json::json!({
        "paymentMethod": payment_method,
        "sameAsShipping": true,
        "shipping": {
            "name": "Asha Rao",
            "email": "asha@example.in",
            "phone": "9123456789",
            "address": "12 MG Road",
            "city": "Bangalore",
            "state": "Karnataka",
            "pincode": "560001",
            "country": "IN"
        }
    })
}
