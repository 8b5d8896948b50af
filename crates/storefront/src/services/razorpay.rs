//! Razorpay Orders API client.
//!
//! Only order creation is needed server-side: the browser widget collects the
//! payment against the returned order id.

use async_trait::async_trait;
use bazaar_core::{OrderReference, PaymentError, PaymentGateway, PaymentRequest};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::RazorpayConfig;

/// Request timeout for gateway calls.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

/// Razorpay API client.
#[derive(Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    orders_url: Url,
    key_id: String,
    key_secret: SecretString,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    description: String,
}

impl RazorpayClient {
    /// Create a new Razorpay API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the API URL cannot
    /// be extended with the orders path.
    pub fn new(config: &RazorpayConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            orders_url: orders_url(&config.api_url)?,
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }

    /// Public key id, handed to the browser widget.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, request: PaymentRequest) -> Result<OrderReference, PaymentError> {
        let body = CreateOrderBody {
            amount: request.amount_minor,
            currency: request.currency.code(),
        };

        let response = self
            .client
            .post(self.orders_url.clone())
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        tracing::info!(order_id = %order.id, amount = request.amount_minor, "Gateway order created");
        Ok(OrderReference(order.id))
    }
}

/// Gateway used when no credentials are configured: online checkout is
/// refused, cash on delivery still works.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_order(&self, _request: PaymentRequest) -> Result<OrderReference, PaymentError> {
        Err(PaymentError::NotConfigured)
    }
}

fn orders_url(api_url: &Url) -> Result<Url, PaymentError> {
    let mut base = api_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("orders")
        .map_err(|e| PaymentError::Parse(format!("invalid gateway URL: {e}")))
}

/// Pull the human-readable description out of an error body, falling back to
/// the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map_or_else(|_| body.to_owned(), |parsed| parsed.error.description)
}
