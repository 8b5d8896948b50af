//! Pincode and city lookups for the address form.

use axum::extract::Path;
use bazaar_core::{Location, location};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::{Json, Query};

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub q: String,
}

/// City and state for a pincode.
#[instrument]
pub async fn pincode(Path(pincode): Path<String>) -> Result<Json<Location>> {
    location::location_from_pincode(&pincode)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("pincode {pincode}")))
}

/// City suggestions for the autocomplete. A blank query suggests nothing.
#[instrument]
pub async fn cities(Query(query): Query<CityQuery>) -> Json<Vec<&'static str>> {
    let input = query.q.trim();
    if input.is_empty() {
        return Json(Vec::new());
    }
    Json(location::city_suggestions(input))
}

/// Every state in the location tables, for the state dropdown.
#[instrument]
pub async fn states() -> Json<Vec<&'static str>> {
    Json(location::states())
}
