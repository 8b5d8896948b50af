//! Status enums for checkout and orders.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery. Placing the order completes checkout.
    #[default]
    #[serde(alias = "cod")]
    CashOnDelivery,
    /// Pay through the online payment gateway.
    #[serde(alias = "razorpay")]
    Online,
}

impl PaymentMethod {
    /// Short label shown on the order summary.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::Online => "Pay Online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an order stands once checkout has been submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Cash-on-delivery order accepted.
    Placed,
    /// Gateway order created; waiting for the customer to pay.
    AwaitingPayment,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_default_is_cod() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_payment_method_accepts_legacy_names() {
        let cod: PaymentMethod = serde_json::from_str("\"cod\"").unwrap();
        let online: PaymentMethod = serde_json::from_str("\"razorpay\"").unwrap();
        assert_eq!(cod, PaymentMethod::CashOnDelivery);
        assert_eq!(online, PaymentMethod::Online);

        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"cash_on_delivery\"");
    }
}
