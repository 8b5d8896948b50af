//! Coupon codes.
//!
//! Codes are 5-10 ASCII letters or digits and are matched exactly as typed:
//! `save10` is not `SAVE10`. A failed parse never touches the cart.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Price;

static COUPON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{5,10}$").expect("Invalid regex"));

/// Codes the shop currently honours, with their percentage off the subtotal.
const KNOWN_COUPONS: &[(&str, u32)] = &[("SAVE10", 10)];

/// Why a coupon code was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error("Please enter a coupon code")]
    Empty,
    #[error("Invalid coupon format. Must be 5-10 alphanumeric characters")]
    InvalidFormat,
    #[error("Invalid coupon code")]
    Unknown,
}

/// An accepted coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub percent_off: u32,
}

impl Coupon {
    /// Look up a customer-entered code.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Empty`] for blank input,
    /// [`CouponError::InvalidFormat`] when the code is not 5-10 alphanumeric
    /// characters, and [`CouponError::Unknown`] when the code is well-formed
    /// but not one the shop honours.
    pub fn parse(input: &str) -> Result<Self, CouponError> {
        if input.trim().is_empty() {
            return Err(CouponError::Empty);
        }
        if !COUPON_RE.is_match(input) {
            return Err(CouponError::InvalidFormat);
        }

        KNOWN_COUPONS
            .iter()
            .find(|(known, _)| *known == input)
            .map(|&(code, percent_off)| Self {
                code: code.to_owned(),
                percent_off,
            })
            .ok_or(CouponError::Unknown)
    }

    /// Amount taken off `subtotal`.
    #[must_use]
    pub fn discount_on(&self, subtotal: Price) -> Price {
        (subtotal * (Decimal::from(self.percent_off) / Decimal::ONE_HUNDRED)).rounded()
    }
}
