//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bazaar_core::{CatalogError, CheckoutError, CouponError, PaymentError, ValidationErrors};
use serde_json::json;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Payment gateway call failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Coupon code rejected.
    #[error("{0}")]
    Coupon(#[from] CouponError),

    /// Session store read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Checkout form has invalid fields.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// Checkout attempted with an empty cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::Invalid(errors) => Self::Validation(errors),
            CheckoutError::Payment(err) => Self::Payment(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Payment(PaymentError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Payment(PaymentError::InvalidAmount(_))
            | Self::Coupon(_)
            | Self::EmptyCart
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Payment(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    const fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Session(_)
                | Self::Internal(_)
                | Self::Catalog(CatalogError::Parse(_) | CatalogError::DuplicateId(_))
                | Self::Payment(
                    PaymentError::Transport(_) | PaymentError::Api { .. } | PaymentError::Parse(_)
                )
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match self {
            Self::Validation(errors) => json!({ "errors": errors }),
            Self::Catalog(CatalogError::NotFound(id)) => {
                json!({ "error": format!("Product not found: {id}") })
            }
            Self::Catalog(_) | Self::Session(_) | Self::Internal(_) => {
                json!({ "error": "Internal server error" })
            }
            Self::Payment(PaymentError::NotConfigured) => {
                json!({ "error": "Online payment is unavailable" })
            }
            Self::Payment(PaymentError::InvalidAmount(_)) => json!({ "error": "Invalid amount" }),
            Self::Payment(_) => json!({ "error": "Failed to create order" }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Updated quantity", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
