//! Order summary for a cart described in YAML.
//!
//! ```yaml
//! items:
//!   - productId: kurta-indigo-handloom
//!     quantity: 2
//!     size: M
//!   - productId: tee-graphic-black
//!     quantity: 1
//!     color: Black
//! ```
//!
//! Quantities are clamped to stock exactly as the storefront cart does.

use std::io::Write;
use std::path::Path;

use bazaar_core::{Cart, Catalog, CatalogError, Coupon, CouponError, OrderSummary, ProductId};
use bazaar_storefront::services::{CatalogLoadError, load_catalog};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while quoting a cart.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cart file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Cart file contents.
#[derive(Debug, Deserialize)]
struct CartFile {
    items: Vec<CartItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartItem {
    product_id: ProductId,
    quantity: u32,
    color: Option<String>,
    size: Option<String>,
}

/// Price the cart at `path` against the catalog at `catalog_path`.
///
/// # Errors
///
/// Returns an error if either file cannot be read, a product id is unknown,
/// or the coupon is rejected.
pub fn run(
    path: &Path,
    catalog_path: &Path,
    coupon: Option<&str>,
    out: &mut impl Write,
) -> Result<(), QuoteError> {
    let content = std::fs::read_to_string(path).map_err(|source| QuoteError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = load_catalog(catalog_path)?;

    let summary = quote(&catalog, &content, coupon)?;
    report(&summary, out)?;
    Ok(())
}

/// Build the cart from YAML and summarize it.
fn quote(catalog: &Catalog, yaml: &str, coupon: Option<&str>) -> Result<OrderSummary, QuoteError> {
    let file: CartFile = serde_yaml::from_str(yaml)?;

    let mut cart = Cart::new();
    for item in &file.items {
        let product = catalog.get(&item.product_id)?;
        let change = cart.store.set_quantity(
            product,
            item.quantity,
            item.color.as_deref(),
            item.size.as_deref(),
        );
        tracing::debug!(product_id = %item.product_id, ?change, "Cart line set");
    }
    cart.coupon = coupon.map(Coupon::parse).transpose()?;

    Ok(cart.summary())
}

fn report(summary: &OrderSummary, out: &mut impl Write) -> std::io::Result<()> {
    if summary.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    for line in &summary.lines {
        let variant: Vec<&str> = [line.color.as_deref(), line.size.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let variant = if variant.is_empty() {
            String::new()
        } else {
            format!(" ({})", variant.join(", "))
        };
        writeln!(
            out,
            "{:>3} x {}{variant} @ {} = {}",
            line.quantity, line.name, line.unit_price, line.line_total
        )?;
    }

    writeln!(out, "Items:    {}", summary.item_count)?;
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    if let Some(code) = &summary.coupon_code {
        writeln!(out, "Discount: -{} ({code})", summary.discount)?;
    }
    writeln!(out, "Shipping: {}", summary.shipping)?;
    writeln!(out, "GST:      {}", summary.tax)?;
    writeln!(out, "Total:    {}", summary.total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": "kurta", "name": "Kurta", "price": 1000, "stock": 2,
                 "variants": {"sizes": [{"name": "M", "inStock": true}]}},
                {"id": "tee", "name": "Tee", "price": 500, "stock": 10}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_quote_clamps_to_stock() {
        let yaml = "items:\n  - productId: kurta\n    quantity: 5\n    size: M\n";
        let summary = quote(&catalog(), yaml, None).unwrap();

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal.display(), "₹2000.00");
        assert_eq!(summary.total.display(), "₹2360.00");
    }

    #[test]
    fn test_quote_with_coupon() {
        let yaml = "items:\n  - productId: tee\n    quantity: 2\n";
        let summary = quote(&catalog(), yaml, Some("SAVE10")).unwrap();

        assert_eq!(summary.discount.display(), "₹100.00");
        assert_eq!(summary.total.display(), "₹1062.00");

        let mut out = Vec::new();
        report(&summary, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Discount: -₹100.00 (SAVE10)"));
        assert!(text.contains("Total:    ₹1062.00"));
    }

    #[test]
    fn test_quote_errors() {
        let unknown = "items:\n  - productId: nope\n    quantity: 1\n";
        assert!(matches!(
            quote(&catalog(), unknown, None),
            Err(QuoteError::Catalog(CatalogError::NotFound(_)))
        ));

        let yaml = "items: []\n";
        assert!(matches!(
            quote(&catalog(), yaml, Some("BOGUS1")),
            Err(QuoteError::Coupon(CouponError::Unknown))
        ));
    }
}
