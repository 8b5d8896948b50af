//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness (catalog loaded)
//!
//! # Products
//! GET  /api/products                - Filtered listing
//! GET  /api/products/search?q=      - Search
//! GET  /api/products/filters        - Filter facets
//! GET  /api/products/{id}           - Product detail
//!
//! # Cart (session-backed)
//! GET    /api/cart                  - Cart view
//! POST   /api/cart/update           - Set line quantity
//! POST   /api/cart/remove           - Remove a variant or a whole product
//! POST   /api/cart/clear            - Empty the cart
//! POST   /api/cart/coupon           - Apply a coupon
//! DELETE /api/cart/coupon           - Remove the coupon
//!
//! # Checkout
//! POST /api/checkout/validate       - Field errors for a form (always 200)
//! POST /api/checkout                - Place the order (422 on invalid form)
//! POST /api/create-order            - Gateway order for an amount
//!
//! # Locations
//! GET  /api/locations/pincode/{pin} - City and state for a pincode
//! GET  /api/locations/cities?q=     - City suggestions
//! GET  /api/locations/states        - All states, sorted
//!
//! Malformed bodies and query strings are answered with 400 and
//! `{"error": ...}`; 422 is reserved for checkout form errors.
//! ```

pub mod cart;
pub mod checkout;
pub mod locations;
pub mod payments;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::{Request, StatusCode},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
        .route("/filters", get(products::filters))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route(
            "/coupon",
            post(cart::apply_coupon).delete(cart::remove_coupon),
        )
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::submit))
        .route("/validate", post(checkout::validate))
}

/// Create the location lookup routes router.
pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/pincode/{pincode}", get(locations::pincode))
        .route("/cities", get(locations::cities))
        .route("/states", get(locations::states))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/checkout", checkout_routes())
        .route("/api/create-order", post(payments::create_order))
        .nest("/api/locations", location_routes())
}

/// Build the complete application: routes, health checks and middleware.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable while the catalog is empty.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
