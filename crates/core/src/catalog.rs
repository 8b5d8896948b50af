//! Read-only product catalog with the shop's listing queries.
//!
//! Listing filters mirror the shop sidebar: categories, variant colors and
//! sizes (in-stock variants only) and a price range. Search is a plain
//! case-insensitive substring match over name, description and category.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::Product;
use crate::types::ProductId;

/// Most products a listing returns.
pub const LIST_LIMIT: usize = 100;

/// Most products a search returns.
pub const SEARCH_LIMIT: usize = 10;

/// Errors raised while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document is not valid product JSON.
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// No product with this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}

/// Listing filter. Empty lists and absent bounds match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Whether `product` passes every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.iter().any(|c| *c == product.category);
        let min_ok = self.min_price.is_none_or(|min| product.price >= min);
        let max_ok = self.max_price.is_none_or(|max| product.price <= max);
        let color_ok =
            self.colors.is_empty() || self.colors.iter().any(|c| product.has_color_in_stock(c));
        let size_ok =
            self.sizes.is_empty() || self.sizes.iter().any(|s| product.has_size_in_stock(s));

        category_ok && min_ok && max_ok && color_ok && size_ok
    }
}

/// Values available to filter on, for rendering the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    /// `[floor(min price), ceil(max price)]`, or `None` for an empty catalog.
    pub price_range: Option<(Decimal, Decimal)>,
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from product records, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two records share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// Parse a JSON array of product records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Products passing `filter`, at most [`LIST_LIMIT`].
    #[must_use]
    pub fn list(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .take(LIST_LIMIT)
            .collect()
    }

    /// Products whose name, description or category contains `query`.
    ///
    /// A blank query returns nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.products
            .iter()
            .filter(|p| {
                [&p.name, &p.description, &p.category]
                    .iter()
                    .any(|text| text.to_lowercase().contains(&needle))
            })
            .take(SEARCH_LIMIT)
            .collect()
    }

    /// Distinct categories, colors and sizes in first-seen order, plus the
    /// price range.
    #[must_use]
    pub fn facets(&self) -> Facets {
        let mut categories: Vec<String> = Vec::new();
        let mut colors: Vec<String> = Vec::new();
        let mut sizes: Vec<String> = Vec::new();

        for product in &self.products {
            push_unique(&mut categories, &product.category);
            for color in &product.variants.colors {
                push_unique(&mut colors, &color.name);
            }
            for size in &product.variants.sizes {
                push_unique(&mut sizes, &size.name);
            }
        }

        let min = self.products.iter().map(|p| p.price).min();
        let max = self.products.iter().map(|p| p.price).max();
        let price_range = min.zip(max).map(|(lo, hi)| (lo.floor(), hi.ceil()));

        Facets {
            categories,
            colors,
            sizes,
            price_range,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_owned());
    }
}
