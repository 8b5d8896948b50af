//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::ops::{Add, Mul, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Arithmetic is only defined between prices of the same currency; the shop
/// trades in a single currency so mixing never happens in practice, and the
/// left operand's currency wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in Indian rupees.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Round to the currency's two decimal places (half away from zero).
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            self.currency_code,
        )
    }

    /// Amount in the currency's minor unit (paise for INR).
    ///
    /// Returns `None` if the amount does not fit in an `i64`.
    #[must_use]
    pub fn to_minor_units(self) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;

        self.rounded()
            .amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
    }

    /// Format for display (e.g., "₹1299.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.amount - rhs.amount, self.currency_code)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self::new(self.amount * Decimal::from(rhs), self.currency_code)
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self::new(self.amount * rhs, self.currency_code)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
        }
    }

    /// Three-letter code as sent to payment gateways.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::inr(Decimal::new(1299, 0)).display(), "₹1299.00");
        assert_eq!(Price::inr(Decimal::new(95, 1)).to_string(), "₹9.50");
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(Price::inr(Decimal::new(500, 0)).to_minor_units(), Some(50_000));
        assert_eq!(Price::inr(Decimal::new(10_255, 3)).to_minor_units(), Some(1026));
    }

    #[test]
    fn test_to_minor_units_out_of_range() {
        assert_eq!(Price::inr(Decimal::MAX).to_minor_units(), None);
        assert_eq!(Price::inr(Decimal::MIN).to_minor_units(), None);
        // Fits in a Decimal but not in i64 paise
        let huge = Decimal::from(i64::MAX);
        assert_eq!(Price::inr(huge).to_minor_units(), None);
    }

    #[test]
    fn test_arithmetic() {
        let unit = Price::inr(Decimal::new(24_950, 2));
        assert_eq!((unit * 3).amount, Decimal::new(74_850, 2));
        assert_eq!((unit + unit - unit).amount, Decimal::new(24_950, 2));
    }
}
