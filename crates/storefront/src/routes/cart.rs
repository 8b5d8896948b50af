//! Cart route handlers.
//!
//! The visitor's [`Cart`] lives in the session. Each handler loads it, applies
//! one change and writes it back, then answers with the full cart view.

use axum::extract::State;
use bazaar_core::{
    Cart, Coupon, LineKey, Price, Product, ProductId, QuantityChange,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::extract::Json;
use crate::models::session::keys;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// One cart line as shown on the cart page.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub quantity: u32,
    /// Upper bound for the quantity selector.
    pub stock: u32,
    pub unit_price: Price,
    pub mrp: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    pub line_total: Price,
}

/// Cart page data: lines plus the price breakdown.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: Price,
    pub discount: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let summary = cart.summary();
        let lines = cart
            .store
            .lines()
            .iter()
            .map(|line| CartLineView {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                image: line.product.display_image().to_owned(),
                color: line.selected_color.clone(),
                size: line.selected_size.clone(),
                quantity: line.quantity,
                stock: line.product.stock,
                unit_price: line.product.unit_price(),
                mrp: line.product.mrp(),
                discount_percent: line.product.discount_percent(),
                line_total: line.line_total(),
            })
            .collect();

        Self {
            lines,
            item_count: summary.item_count,
            subtotal: summary.subtotal,
            discount: summary.discount,
            coupon_code: summary.coupon_code,
            shipping: summary.shipping,
            tax: summary.tax,
            total: summary.total,
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart, or an empty one.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Set a line's quantity (0 removes it).
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Remove one variant line, or every line of a product.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub all_variants: bool,
}

/// Coupon code entered on the cart page.
#[derive(Debug, Deserialize)]
pub struct ApplyCouponRequest {
    pub code: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Set the quantity of a line, adding it if new.
///
/// The quantity is clamped to the product's stock. Picking a color or size
/// the product does not offer in stock is rejected.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let product = state.catalog().get(&body.product_id)?;
    if body.quantity > 0 {
        check_variant(product, body.color.as_deref(), body.size.as_deref())?;
    }

    let mut cart = load_cart(&session).await?;
    let change = cart.store.set_quantity(
        product,
        body.quantity,
        body.color.as_deref(),
        body.size.as_deref(),
    );

    if change != QuantityChange::Unchanged {
        save_cart(&session, &cart).await?;
        add_breadcrumb(
            "cart",
            "Updated quantity",
            Some(&[("product_id", product.id.as_str())]),
        );
    }
    tracing::debug!(?change, count = cart.store.total_count(), "Cart updated");

    Ok(Json(CartView::from(&cart)))
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(body): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;

    let removed = if body.all_variants {
        cart.store.remove_line(&body.product_id)
    } else {
        let key = LineKey::new(body.product_id, body.color, body.size);
        usize::from(cart.store.remove_variant(&key))
    };

    if removed > 0 {
        save_cart(&session, &cart).await?;
    }
    tracing::debug!(removed, "Cart lines removed");

    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart and drop any coupon.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Apply a coupon. A rejected code leaves the cart as it was.
#[instrument(skip(session))]
pub async fn apply_coupon(
    session: Session,
    Json(body): Json<ApplyCouponRequest>,
) -> Result<Json<CartView>> {
    let coupon = Coupon::parse(&body.code)?;

    let mut cart = load_cart(&session).await?;
    cart.coupon = Some(coupon);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove the applied coupon.
#[instrument(skip(session))]
pub async fn remove_coupon(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.coupon.take().is_some() {
        save_cart(&session, &cart).await?;
    }
    Ok(Json(CartView::from(&cart)))
}

fn check_variant(product: &Product, color: Option<&str>, size: Option<&str>) -> Result<()> {
    if let Some(color) = color
        && !product.has_color_in_stock(color)
    {
        return Err(AppError::BadRequest(format!(
            "Color {color} is not available for {}",
            product.name
        )));
    }
    if let Some(size) = size
        && !product.has_size_in_stock(size)
    {
        return Err(AppError::BadRequest(format!(
            "Size {size} is not available for {}",
            product.name
        )));
    }
    Ok(())
}
