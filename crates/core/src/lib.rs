//! Bazaar Core - cart, pricing and checkout rules.
//!
//! This crate holds the business rules shared by the Bazaar components:
//! - `storefront` - JSON HTTP service for the shop
//! - `cli` - Command-line tools for checking forms and quoting carts
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and traits - no
//! network clients, no file access. Collaborators such as the payment gateway
//! are described by traits and supplied by the caller.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails and statuses
//! - [`product`] - Product snapshots as served by the catalog
//! - [`catalog`] - Filtering, search and facets over a product list
//! - [`cart`] - The in-session cart store keyed by product variant
//! - [`coupon`] - Coupon code parsing
//! - [`summary`] - Order summary (subtotal, discount, GST, total)
//! - [`checkout`] - Checkout form and its field validation
//! - [`location`] - Indian pincode and city lookups
//! - [`payment`] - Payment gateway trait and checkout dispatch

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod location;
pub mod payment;
pub mod product;
pub mod summary;
pub mod types;

pub use cart::{Cart, CartLine, CartStore, LineKey, QuantityChange};
pub use catalog::{Catalog, CatalogError, Facets, ProductFilter};
pub use checkout::{
    Address, AddressField, AddressKind, CheckoutField, CheckoutForm, ValidationErrors,
    validate_checkout_form, validate_field,
};
pub use coupon::{Coupon, CouponError};
pub use location::Location;
pub use payment::{
    CheckoutError, OrderPlacement, OrderReference, PaymentError, PaymentGateway, PaymentRequest,
    place_order,
};
pub use product::Product;
pub use summary::OrderSummary;
pub use types::*;
