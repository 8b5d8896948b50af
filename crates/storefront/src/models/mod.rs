//! Storefront request/response models.

pub mod session;
