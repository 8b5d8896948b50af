//! Order summary: the price breakdown shown beside the checkout form.
//!
//! Shipping is free. GST is charged at 18% on the subtotal after any coupon
//! discount, and every figure is rounded to paise.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartLine;
use crate::coupon::Coupon;
use crate::types::{CurrencyCode, Price, ProductId};

/// GST rate applied to the discounted subtotal (18%).
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// One row of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Price breakdown for a set of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub item_count: u32,
    pub subtotal: Price,
    pub discount: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Build the summary for `lines`, applying `coupon` if present.
    #[must_use]
    pub fn from_lines(lines: &[CartLine], coupon: Option<&Coupon>) -> Self {
        let zero = Price::zero(CurrencyCode::INR);

        let rows: Vec<SummaryLine> = lines
            .iter()
            .map(|line| SummaryLine {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                image: line.product.display_image().to_owned(),
                quantity: line.quantity,
                unit_price: line.product.unit_price(),
                line_total: line.line_total(),
                color: line.selected_color.clone(),
                size: line.selected_size.clone(),
            })
            .collect();

        let item_count = rows.iter().map(|row| row.quantity).sum();
        let subtotal = rows
            .iter()
            .fold(zero, |acc, row| acc + row.line_total)
            .rounded();
        let discount = coupon.map_or(zero, |c| c.discount_on(subtotal));
        let shipping = zero;
        let tax = ((subtotal - discount) * GST_RATE).rounded();
        let total = (subtotal - discount + shipping + tax).rounded();

        Self {
            lines: rows,
            item_count,
            subtotal,
            discount,
            coupon_code: coupon.map(|c| c.code.clone()),
            shipping,
            tax,
            total,
        }
    }

    /// Whether there is anything to pay for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartStore;
    use crate::product::tests::product;

    #[test]
    fn test_gst_rate() {
        assert_eq!(GST_RATE, Decimal::new(18, 2));
    }

    #[test]
    fn test_summary_without_coupon() {
        let mut cart = CartStore::new();
        cart.set_quantity(&product("a", 1000, 5), 2, None, None);
        cart.set_quantity(&product("b", 500, 5), 1, None, Some("M"));

        let summary = OrderSummary::from_lines(cart.lines(), None);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal.amount, Decimal::new(2500, 0));
        assert_eq!(summary.discount.amount, Decimal::ZERO);
        assert_eq!(summary.shipping.amount, Decimal::ZERO);
        assert_eq!(summary.tax.amount, Decimal::new(450, 0));
        assert_eq!(summary.total.amount, Decimal::new(2950, 0));
        assert_eq!(summary.lines.len(), 2);
    }

    #[test]
    fn test_summary_with_coupon() {
        let mut cart = CartStore::new();
        cart.set_quantity(&product("a", 1000, 5), 1, None, None);
        let coupon = Coupon::parse("SAVE10").unwrap();

        let summary = OrderSummary::from_lines(cart.lines(), Some(&coupon));
        assert_eq!(summary.discount.amount, Decimal::new(100, 0));
        assert_eq!(summary.tax.amount, Decimal::new(162, 0));
        assert_eq!(summary.total.amount, Decimal::new(1062, 0));
        assert_eq!(summary.coupon_code.as_deref(), Some("SAVE10"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = OrderSummary::from_lines(&[], None);
        assert!(summary.is_empty());
        assert_eq!(summary.total.amount, Decimal::ZERO);
    }
}
