//! Services backing the storefront routes.
//!
//! - `catalog` - Loading the product catalog at start-up
//! - `razorpay` - Payment gateway client

pub mod catalog;
pub mod razorpay;

pub use catalog::{CatalogLoadError, load_catalog};
pub use razorpay::{DisabledGateway, RazorpayClient};
