//! Product route handlers.

use axum::extract::{Path, State};
use bazaar_core::{Facets, Product, ProductFilter, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::extract::{Json, Query};
use crate::state::AppState;

/// Listing query. List values are comma-separated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub categories: Option<String>,
    pub colors: Option<String>,
    pub sizes: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl From<ListQuery> for ProductFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            categories: split_list(query.categories.as_deref()),
            colors: split_list(query.colors.as_deref()),
            sizes: split_list(query.sizes.as_deref()),
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// List products matching the sidebar filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Product>> {
    let filter = ProductFilter::from(query);
    Json(state.catalog().list(&filter).into_iter().cloned().collect())
}

/// Search products by name, description or category.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Product>> {
    Json(state.catalog().search(&query.q).into_iter().cloned().collect())
}

/// Values available for filtering.
#[instrument(skip(state))]
pub async fn filters(State(state): State<AppState>) -> Json<Facets> {
    Json(state.catalog().facets())
}

/// One product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog().get(&id)?.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(Some("Shirts, Kurtas,,")), ["Shirts", "Kurtas"]);
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn test_query_to_filter() {
        let filter = ProductFilter::from(ListQuery {
            sizes: Some("M,L".to_string()),
            max_price: Some(Decimal::new(999, 0)),
            ..ListQuery::default()
        });
        assert_eq!(filter.sizes, ["M", "L"]);
        assert!(filter.categories.is_empty());
        assert_eq!(filter.max_price, Some(Decimal::new(999, 0)));
    }
}
