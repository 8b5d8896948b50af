//! Payment gateway seam and checkout dispatch.
//!
//! [`place_order`] is the last step of checkout: it refuses empty carts and
//! invalid forms, then either accepts a cash-on-delivery order (clearing the
//! cart) or asks the [`PaymentGateway`] to open an order for the total. An
//! online order keeps the cart until the gateway confirms payment, which
//! happens outside this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::checkout::{CheckoutForm, ValidationErrors, validate_checkout_form};
use crate::summary::OrderSummary;
use crate::types::{CurrencyCode, OrderNumber, OrderStatus, PaymentMethod, Price};

/// Errors reported by a payment gateway implementation.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway could not be reached.
    #[error("payment gateway unreachable: {0}")]
    Transport(String),

    /// The gateway answered with an error status.
    #[error("payment gateway error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The gateway's answer could not be understood.
    #[error("unexpected payment gateway response: {0}")]
    Parse(String),

    /// Online payment has no gateway credentials.
    #[error("online payment is not configured")]
    NotConfigured,

    /// The amount is zero, negative, or too large to express in minor units.
    #[error("invalid payment amount: {0}")]
    InvalidAmount(Price),
}

/// Opaque order identifier issued by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderReference(pub String);

impl OrderReference {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What the gateway is asked to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    /// Amount in minor units (paise).
    pub amount_minor: i64,
    pub currency: CurrencyCode,
}

impl PaymentRequest {
    /// Request for a positive amount.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidAmount`] if `amount` is not positive or
    /// does not fit in minor units.
    pub fn for_amount(amount: Price) -> Result<Self, PaymentError> {
        match amount.to_minor_units() {
            Some(minor) if minor > 0 => Ok(Self {
                amount_minor: minor,
                currency: amount.currency_code,
            }),
            _ => Err(PaymentError::InvalidAmount(amount)),
        }
    }
}

/// An external payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a gateway order for `request`, returning its reference.
    async fn create_order(&self, request: PaymentRequest) -> Result<OrderReference, PaymentError>;
}

/// Contact details handed to the gateway's payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Outcome of a successful checkout submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OrderPlacement {
    /// Cash-on-delivery order accepted; the cart has been cleared.
    Placed {
        order_number: OrderNumber,
        summary: OrderSummary,
    },
    /// Gateway order opened; the client completes payment with it.
    AwaitingPayment {
        reference: OrderReference,
        request: PaymentRequest,
        prefill: PaymentPrefill,
        summary: OrderSummary,
    },
}

impl OrderPlacement {
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        match self {
            Self::Placed { .. } => OrderStatus::Placed,
            Self::AwaitingPayment { .. } => OrderStatus::AwaitingPayment,
        }
    }
}

/// Why checkout was refused.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("checkout form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Validate and dispatch a checkout.
///
/// The cart is only modified when a cash-on-delivery order is placed. Any
/// error leaves it untouched.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`], [`CheckoutError::Invalid`] with the
/// field errors, or [`CheckoutError::Payment`] when the gateway fails.
pub async fn place_order(
    cart: &mut Cart,
    form: &CheckoutForm,
    gateway: &dyn PaymentGateway,
) -> Result<OrderPlacement, CheckoutError> {
    if cart.store.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut form = form.clone();
    form.sync_billing();
    let errors = validate_checkout_form(&form);
    if !errors.is_empty() {
        return Err(CheckoutError::Invalid(errors));
    }

    let summary = cart.summary();
    match form.payment_method {
        PaymentMethod::CashOnDelivery => {
            cart.clear();
            Ok(OrderPlacement::Placed {
                order_number: OrderNumber::generate(),
                summary,
            })
        }
        PaymentMethod::Online => {
            let request = PaymentRequest::for_amount(summary.total)?;
            let reference = gateway.create_order(request).await?;
            Ok(OrderPlacement::AwaitingPayment {
                reference,
                request,
                prefill: PaymentPrefill {
                    name: form.shipping.name,
                    email: form.shipping.email,
                    contact: form.shipping.phone,
                },
                summary,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;
    use crate::checkout::Address;
    use crate::product::tests::product;

    #[derive(Default)]
    struct RecordingGateway {
        requests: Mutex<Vec<PaymentRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn create_order(
            &self,
            request: PaymentRequest,
        ) -> Result<OrderReference, PaymentError> {
            if self.fail {
                return Err(PaymentError::Api {
                    status: 500,
                    message: "down".to_string(),
                });
            }
            self.requests.lock().unwrap().push(request);
            Ok(OrderReference("order_test_1".to_string()))
        }
    }

    fn valid_form(method: PaymentMethod) -> CheckoutForm {
        let shipping = Address {
            name: "Asha Rao".to_string(),
            email: "asha@example.in".to_string(),
            phone: "9123456789".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bangalore".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            country: "IN".to_string(),
        };
        CheckoutForm {
            shipping,
            payment_method: method,
            ..CheckoutForm::default()
        }
    }

    fn cart_with_items() -> Cart {
        let mut cart = Cart::new();
        cart.store
            .set_quantity(&product("a", 500, 10), 1, None, None);
        cart
    }

    #[test]
    fn test_payment_request_rejects_zero() {
        let zero = Price::inr(Decimal::ZERO);
        assert!(matches!(
            PaymentRequest::for_amount(zero),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_payment_request_rejects_unrepresentable_amount() {
        assert!(matches!(
            PaymentRequest::for_amount(Price::inr(Decimal::MAX)),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_cart_refused() {
        let gateway = RecordingGateway::default();
        let mut cart = Cart::new();
        let result =
            place_order(&mut cart, &valid_form(PaymentMethod::CashOnDelivery), &gateway).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_invalid_form_leaves_cart() {
        let gateway = RecordingGateway::default();
        let mut cart = cart_with_items();
        let mut form = valid_form(PaymentMethod::CashOnDelivery);
        form.shipping.pincode = "12345".to_string();

        let Err(CheckoutError::Invalid(errors)) = place_order(&mut cart, &form, &gateway).await
        else {
            panic!("expected validation failure");
        };
        // Billing mirrors shipping, so both pincodes fail.
        assert_eq!(errors.len(), 2);
        assert_eq!(cart.store.len(), 1);
    }

    #[tokio::test]
    async fn test_cash_on_delivery_clears_cart() {
        let gateway = RecordingGateway::default();
        let mut cart = cart_with_items();

        let placement =
            place_order(&mut cart, &valid_form(PaymentMethod::CashOnDelivery), &gateway)
                .await
                .unwrap();

        assert_eq!(placement.status(), OrderStatus::Placed);
        assert!(cart.store.is_empty());
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_online_charges_total_in_paise() {
        let gateway = RecordingGateway::default();
        let mut cart = cart_with_items();

        let placement = place_order(&mut cart, &valid_form(PaymentMethod::Online), &gateway)
            .await
            .unwrap();

        let OrderPlacement::AwaitingPayment {
            reference, prefill, ..
        } = placement
        else {
            panic!("expected gateway order");
        };
        assert_eq!(reference.as_str(), "order_test_1");
        assert_eq!(prefill.contact, "9123456789");

        // 500 + 18% GST = 590.00 rupees
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.first().unwrap().amount_minor, 59_000);
        assert_eq!(cart.store.len(), 1);
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_cart() {
        let gateway = RecordingGateway {
            fail: true,
            ..RecordingGateway::default()
        };
        let mut cart = cart_with_items();

        let result = place_order(&mut cart, &valid_form(PaymentMethod::Online), &gateway).await;
        assert!(matches!(result, Err(CheckoutError::Payment(_))));
        assert_eq!(cart.store.len(), 1);
    }
}
