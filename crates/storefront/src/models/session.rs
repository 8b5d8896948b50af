//! Session-related types.

/// Session keys for per-visitor state.
pub mod keys {
    /// Key for the visitor's cart (`bazaar_core::Cart`).
    pub const CART: &str = "cart";
}
