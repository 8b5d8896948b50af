//! The in-session shopping cart.
//!
//! A [`CartStore`] is an ordered list of [`CartLine`]s, each identified by a
//! [`LineKey`]: the product id plus the selected color and size. The same
//! product picked in two sizes is two lines.
//!
//! Invariant: every stored line has `1 <= quantity <= product.stock`.
//! Requested quantities are clamped into `0..=stock` and a quantity of zero
//! removes the line, so a zero-quantity line is never observable.
//!
//! The store is a plain value. Whoever owns it (an HTTP session, a CLI
//! invocation, a test) decides its lifetime.

use serde::{Deserialize, Serialize};

use crate::coupon::Coupon;
use crate::product::Product;
use crate::summary::OrderSummary;
use crate::types::{CurrencyCode, Price, ProductId};

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl LineKey {
    #[must_use]
    pub const fn new(product_id: ProductId, color: Option<String>, size: Option<String>) -> Self {
        Self {
            product_id,
            color,
            size,
        }
    }
}

/// One entry in the cart: a product snapshot, a quantity and a variant
/// selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl CartLine {
    /// This line's identity key.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product.id.clone(),
            self.selected_color.clone(),
            self.selected_size.clone(),
        )
    }

    /// Whether this line has the given identity.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id
            && self.selected_color == key.color
            && self.selected_size == key.size
    }

    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price() * self.quantity
    }
}

/// What a [`CartStore::set_quantity`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// A new line was appended.
    Added { quantity: u32 },
    /// An existing line's quantity was replaced.
    Updated { from: u32, to: u32 },
    /// An existing line was removed because the quantity reached zero.
    Removed,
    /// Nothing changed (zero requested for a line that does not exist).
    Unchanged,
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Set the quantity of the line identified by `product` + `color` + `size`.
    ///
    /// The quantity is clamped to the product's stock. Zero removes an
    /// existing line and is a no-op for a missing one. An existing line's
    /// product snapshot is refreshed from `product`.
    pub fn set_quantity(
        &mut self,
        product: &Product,
        quantity: u32,
        color: Option<&str>,
        size: Option<&str>,
    ) -> QuantityChange {
        let quantity = quantity.min(product.stock);
        let key = LineKey::new(
            product.id.clone(),
            color.map(str::to_owned),
            size.map(str::to_owned),
        );

        match self.position(&key) {
            Some(index) if quantity == 0 => {
                self.lines.remove(index);
                QuantityChange::Removed
            }
            Some(index) => {
                let Some(line) = self.lines.get_mut(index) else {
                    return QuantityChange::Unchanged;
                };
                let from = line.quantity;
                line.quantity = quantity;
                line.product = product.clone();
                QuantityChange::Updated { from, to: quantity }
            }
            None if quantity == 0 => QuantityChange::Unchanged,
            None => {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity,
                    selected_color: key.color,
                    selected_size: key.size,
                });
                QuantityChange::Added { quantity }
            }
        }
    }

    /// Remove every line for `product_id`, whatever its variant.
    ///
    /// Returns the number of lines removed.
    pub fn remove_line(&mut self, product_id: &ProductId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product.id != product_id);
        before - self.lines.len()
    }

    /// Remove exactly the line with identity `key`.
    ///
    /// Returns true if a line was removed.
    pub fn remove_variant(&mut self, key: &LineKey) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        self.lines.remove(index);
        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of unit price × quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::zero(CurrencyCode::INR), |acc, line| {
                acc + line.line_total()
            })
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line with identity `key`, if any.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(key))
    }
}

/// A cart together with the coupon applied to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub store: CartStore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
}

impl Cart {
    /// An empty cart with no coupon.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: CartStore::new(),
            coupon: None,
        }
    }

    /// Price breakdown for the current contents.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_lines(self.store.lines(), self.coupon.as_ref())
    }

    /// Empty the cart and drop the coupon.
    pub fn clear(&mut self) {
        self.store.clear();
        self.coupon = None;
    }
}
