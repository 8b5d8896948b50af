//! Direct gateway order creation.

use axum::extract::State;
use bazaar_core::{PaymentRequest, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::extract::Json;
use crate::state::AppState;

/// Amount in rupees.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
}

/// Open a gateway order for an amount in rupees, charged in paise.
#[instrument(skip(state))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    let request = PaymentRequest::for_amount(Price::inr(body.amount))?;
    let reference = state.gateway().create_order(request).await?;
    Ok(Json(CreateOrderResponse {
        order_id: reference.0,
    }))
}
