//! Product snapshots as served by the catalog.
//!
//! The cart and the order summary only ever hold copies of these records;
//! the catalog stays the owner of stock and pricing.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, ReviewId};

/// Image shown when a product has no pictures at all.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// A product record.
///
/// Field names follow the catalog's JSON (camelCase); `_id` is accepted as an
/// alias for `id` so raw document-store exports load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Selling price in rupees.
    pub price: Decimal,
    /// MRP in rupees.
    #[serde(default)]
    pub original_price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ProductImages>,
    #[serde(default)]
    pub variants: Variants,
    #[serde(default)]
    pub ratings: Vec<u8>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Main image plus gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImages {
    pub main: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// Color and size options offered for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
}

/// A color variant (`code` is a CSS color such as `#1f2937`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOption {
    pub name: String,
    pub code: String,
    pub in_stock: bool,
}

/// A size variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub name: String,
    pub in_stock: bool,
}

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: ReviewId,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Product {
    /// Selling price as a [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::inr(self.price)
    }

    /// MRP as a [`Price`].
    #[must_use]
    pub const fn mrp(&self) -> Price {
        Price::inr(self.original_price)
    }

    /// Percentage off the MRP, rounded to the nearest whole percent.
    ///
    /// `None` when there is no MRP or it is not above the selling price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        if self.original_price <= self.price || self.original_price.is_zero() {
            return None;
        }

        let percent =
            (self.original_price - self.price) / self.original_price * Decimal::ONE_HUNDRED;
        percent
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }

    /// Mean of all ratings, or 0 when unrated.
    #[must_use]
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }

        let sum: u32 = self.ratings.iter().map(|&r| u32::from(r)).sum();
        #[allow(clippy::cast_precision_loss)] // rating counts stay far below f64 precision
        let len = self.ratings.len() as f64;
        f64::from(sum) / len
    }

    /// Whether any units are left.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether the named color is offered and in stock.
    #[must_use]
    pub fn has_color_in_stock(&self, name: &str) -> bool {
        self.variants
            .colors
            .iter()
            .any(|c| c.in_stock && c.name == name)
    }

    /// Whether the named size is offered and in stock.
    #[must_use]
    pub fn has_size_in_stock(&self, name: &str) -> bool {
        self.variants
            .sizes
            .iter()
            .any(|s| s.in_stock && s.name == name)
    }

    /// Best image to show in listings: `image_url`, then the gallery main
    /// image, then the placeholder.
    #[must_use]
    pub fn display_image(&self) -> &str {
        if !self.image_url.is_empty() {
            return &self.image_url;
        }
        self.images
            .as_ref()
            .map(|i| i.main.as_str())
            .filter(|main| !main.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Minimal product used across the crate's tests.
    pub(crate) fn product(id: &str, price: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::new(price, 0),
            original_price: Decimal::new(price, 0),
            stock,
            category: "Shirts".to_string(),
            subcategory: None,
            image_url: String::new(),
            images: None,
            variants: Variants::default(),
            ratings: Vec::new(),
            reviews: Vec::new(),
        }
    }

    #[test]
    fn test_discount_percent() {
        let mut p = product("p1", 750, 5);
        p.original_price = Decimal::new(1000, 0);
        assert_eq!(p.discount_percent(), Some(25));

        p.original_price = Decimal::new(750, 0);
        assert_eq!(p.discount_percent(), None);
    }

    #[test]
    fn test_discount_percent_rounds() {
        let mut p = product("p1", 2, 5);
        p.original_price = Decimal::new(3, 0);
        assert_eq!(p.discount_percent(), Some(33));
    }

    #[test]
    fn test_average_rating() {
        let mut p = product("p1", 100, 1);
        assert!((p.average_rating() - 0.0).abs() < f64::EPSILON);
        p.ratings = vec![4, 5];
        assert!((p.average_rating() - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variant_stock() {
        let mut p = product("p1", 100, 1);
        p.variants.sizes = vec![
            SizeOption {
                name: "M".to_string(),
                in_stock: true,
            },
            SizeOption {
                name: "L".to_string(),
                in_stock: false,
            },
        ];
        assert!(p.has_size_in_stock("M"));
        assert!(!p.has_size_in_stock("L"));
        assert!(!p.has_color_in_stock("Red"));
    }

    #[test]
    fn test_display_image_fallbacks() {
        let mut p = product("p1", 100, 1);
        assert_eq!(p.display_image(), PLACEHOLDER_IMAGE);
        p.images = Some(ProductImages {
            main: "/img/main.jpg".to_string(),
            gallery: Vec::new(),
        });
        assert_eq!(p.display_image(), "/img/main.jpg");
        p.image_url = "/img/url.jpg".to_string();
        assert_eq!(p.display_image(), "/img/url.jpg");
    }

    #[test]
    fn test_deserialize_catalog_record() {
        let json = r#"{
            "_id": "65f1",
            "name": "Linen Kurta",
            "price": 1299,
            "originalPrice": 1999,
            "stock": 4,
            "category": "Kurtas",
            "imageUrl": "/img/kurta.jpg",
            "variants": { "sizes": [{ "name": "M", "inStock": true }] }
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "65f1");
        assert_eq!(p.price, Decimal::new(1299, 0));
        assert_eq!(p.discount_percent(), Some(35));
        assert!(p.has_size_in_stock("M"));
    }
}
