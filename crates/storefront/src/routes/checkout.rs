//! Checkout route handlers.
//!
//! `validate` backs the form's on-blur checks and never fails on bad input;
//! `submit` runs the same validation and then dispatches the payment method.

use axum::extract::State;
use bazaar_core::{
    CheckoutField, CheckoutForm, OrderPlacement, ValidationErrors, place_order,
    validate_checkout_form, validate_field,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::extract::Json;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// Validation outcome for a whole form or a single field.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: ValidationErrors,
}

/// Optional single-field selector for on-blur validation.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(flatten)]
    pub form: CheckoutForm,
    pub field: Option<CheckoutField>,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    #[serde(flatten)]
    pub placement: OrderPlacement,
    /// Public gateway key for the payment widget, on online orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

/// Validate a checkout form, or one field of it.
///
/// Billing is synced from shipping first when "same as shipping" is on, so
/// the result matches what `submit` would report.
#[instrument(skip(body), fields(field = ?body.field))]
pub async fn validate(Json(body): Json<ValidateRequest>) -> Json<ValidationResponse> {
    let mut form = body.form;
    form.sync_billing();

    let errors = match body.field {
        Some(field) => {
            let mut errors = ValidationErrors::new();
            errors.update(field, validate_field(&form, field));
            errors
        }
        None => validate_checkout_form(&form),
    };

    Json(ValidationResponse {
        valid: errors.is_empty(),
        errors,
    })
}

/// Place the order for the session's cart.
///
/// Cash on delivery clears the cart. Online payment opens a gateway order and
/// keeps the cart until the payment is confirmed.
#[instrument(skip(state, session, form), fields(payment_method = %form.payment_method))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutResponse>> {
    let mut cart = load_cart(&session).await?;
    let placement = place_order(&mut cart, &form, state.gateway()).await?;

    match &placement {
        OrderPlacement::Placed { order_number, .. } => {
            save_cart(&session, &cart).await?;
            add_breadcrumb("checkout", "Order placed", None);
            tracing::info!(%order_number, "Cash on delivery order placed");
        }
        OrderPlacement::AwaitingPayment { reference, .. } => {
            tracing::info!(order_id = reference.as_str(), "Awaiting online payment");
        }
    }

    let key_id = matches!(placement, OrderPlacement::AwaitingPayment { .. })
        .then(|| state.config().razorpay.as_ref().map(|r| r.key_id.clone()))
        .flatten();

    Ok(Json(CheckoutResponse { placement, key_id }))
}
