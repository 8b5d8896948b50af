//! Checkout form and its validation.
//!
//! The form holds a shipping and a billing [`Address`] plus the chosen
//! [`PaymentMethod`]. Validation is a pure function of the form: it reports
//! every failing field at once (whole-form submit) or a single field
//! (on blur), and never mutates anything.
//!
//! While `same_as_shipping` is on, billing is a mirror of shipping: every
//! shipping edit is copied across and turning the flag on overwrites billing
//! with the current shipping values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::location::{self, DOMESTIC_COUNTRY, Location};
use crate::types::{Email, PaymentMethod};

/// Optional `+`, a non-zero digit, then 9-14 more digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{9,14}$").expect("Invalid regex"));

/// Indian pincodes are exactly six digits.
static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("Invalid regex"));

/// Which of the two addresses a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Shipping,
    Billing,
}

/// A field within an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Name,
    Email,
    Phone,
    Address,
    City,
    State,
    Pincode,
    Country,
}

impl AddressField {
    /// All fields in form order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::State,
        Self::Pincode,
        Self::Country,
    ];

    /// Message shown when the field fails validation.
    #[must_use]
    pub const fn error_message(self) -> &'static str {
        match self {
            Self::Name => "Name is required",
            Self::Email => "Invalid email address",
            Self::Phone => "Invalid phone number",
            Self::Address => "Address is required",
            Self::City => "City is required",
            Self::State => "State is required",
            Self::Pincode => "Invalid pincode",
            Self::Country => "Country is required",
        }
    }

    /// Whether `value` is acceptable for this field.
    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Email => Email::is_valid(value),
            Self::Phone => is_valid_phone(value),
            Self::Pincode => is_valid_pincode(value),
            Self::Name | Self::Address | Self::City | Self::State | Self::Country => {
                is_present(value)
            }
        }
    }
}

/// A form field: an address field of either address.
///
/// Serialized in camelCase (`shippingName`, `billingPincode`, ...) so error
/// maps can be keyed by the input names the client renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    ShippingName,
    ShippingEmail,
    ShippingPhone,
    ShippingAddress,
    ShippingCity,
    ShippingState,
    ShippingPincode,
    ShippingCountry,
    BillingName,
    BillingEmail,
    BillingPhone,
    BillingAddress,
    BillingCity,
    BillingState,
    BillingPincode,
    BillingCountry,
}

impl CheckoutField {
    /// Every validated field, shipping first.
    pub const ALL: [Self; 16] = [
        Self::ShippingName,
        Self::ShippingEmail,
        Self::ShippingPhone,
        Self::ShippingAddress,
        Self::ShippingCity,
        Self::ShippingState,
        Self::ShippingPincode,
        Self::ShippingCountry,
        Self::BillingName,
        Self::BillingEmail,
        Self::BillingPhone,
        Self::BillingAddress,
        Self::BillingCity,
        Self::BillingState,
        Self::BillingPincode,
        Self::BillingCountry,
    ];

    /// Build from address kind and field.
    #[must_use]
    pub const fn new(kind: AddressKind, field: AddressField) -> Self {
        use AddressField as F;
        use AddressKind as K;

        match (kind, field) {
            (K::Shipping, F::Name) => Self::ShippingName,
            (K::Shipping, F::Email) => Self::ShippingEmail,
            (K::Shipping, F::Phone) => Self::ShippingPhone,
            (K::Shipping, F::Address) => Self::ShippingAddress,
            (K::Shipping, F::City) => Self::ShippingCity,
            (K::Shipping, F::State) => Self::ShippingState,
            (K::Shipping, F::Pincode) => Self::ShippingPincode,
            (K::Shipping, F::Country) => Self::ShippingCountry,
            (K::Billing, F::Name) => Self::BillingName,
            (K::Billing, F::Email) => Self::BillingEmail,
            (K::Billing, F::Phone) => Self::BillingPhone,
            (K::Billing, F::Address) => Self::BillingAddress,
            (K::Billing, F::City) => Self::BillingCity,
            (K::Billing, F::State) => Self::BillingState,
            (K::Billing, F::Pincode) => Self::BillingPincode,
            (K::Billing, F::Country) => Self::BillingCountry,
        }
    }

    /// Which address this field belongs to.
    #[must_use]
    pub const fn kind(self) -> AddressKind {
        match self {
            Self::ShippingName
            | Self::ShippingEmail
            | Self::ShippingPhone
            | Self::ShippingAddress
            | Self::ShippingCity
            | Self::ShippingState
            | Self::ShippingPincode
            | Self::ShippingCountry => AddressKind::Shipping,
            _ => AddressKind::Billing,
        }
    }

    /// The address field, without the shipping/billing prefix.
    #[must_use]
    pub const fn field(self) -> AddressField {
        match self {
            Self::ShippingName | Self::BillingName => AddressField::Name,
            Self::ShippingEmail | Self::BillingEmail => AddressField::Email,
            Self::ShippingPhone | Self::BillingPhone => AddressField::Phone,
            Self::ShippingAddress | Self::BillingAddress => AddressField::Address,
            Self::ShippingCity | Self::BillingCity => AddressField::City,
            Self::ShippingState | Self::BillingState => AddressField::State,
            Self::ShippingPincode | Self::BillingPincode => AddressField::Pincode,
            Self::ShippingCountry | Self::BillingCountry => AddressField::Country,
        }
    }
}

/// Same spelling as the serialized form, e.g. `billingPincode`.
impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            AddressKind::Shipping => "shipping",
            AddressKind::Billing => "billing",
        };
        let field = match self.field() {
            AddressField::Name => "Name",
            AddressField::Email => "Email",
            AddressField::Phone => "Phone",
            AddressField::Address => "Address",
            AddressField::City => "City",
            AddressField::State => "State",
            AddressField::Pincode => "Pincode",
            AddressField::Country => "Country",
        };
        write!(f, "{kind}{field}")
    }
}

/// A postal address with contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

impl Default for Address {
    /// Blank address in the domestic country.
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            country: DOMESTIC_COUNTRY.to_string(),
        }
    }
}

impl Address {
    /// Every field blank, country included.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            country: String::new(),
        }
    }

    #[must_use]
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Name => &self.name,
            AddressField::Email => &self.email,
            AddressField::Phone => &self.phone,
            AddressField::Address => &self.address,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Pincode => &self.pincode,
            AddressField::Country => &self.country,
        }
    }

    fn slot(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::Name => &mut self.name,
            AddressField::Email => &mut self.email,
            AddressField::Phone => &mut self.phone,
            AddressField::Address => &mut self.address,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Pincode => &mut self.pincode,
            AddressField::Country => &mut self.country,
        }
    }

    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Whether this address is in the domestic country.
    #[must_use]
    pub fn is_domestic(&self) -> bool {
        location::is_domestic(&self.country)
    }
}

/// Everything the customer submits at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub shipping: Address,
    pub billing: Address,
    pub payment_method: PaymentMethod,
    pub same_as_shipping: bool,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            shipping: Address::default(),
            billing: Address::default(),
            payment_method: PaymentMethod::default(),
            same_as_shipping: true,
        }
    }
}

impl CheckoutForm {
    /// The address of the given kind.
    #[must_use]
    pub const fn address(&self, kind: AddressKind) -> &Address {
        match kind {
            AddressKind::Shipping => &self.shipping,
            AddressKind::Billing => &self.billing,
        }
    }

    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: CheckoutField) -> &str {
        self.address(field.kind()).get(field.field())
    }

    /// Set one field.
    ///
    /// A shipping edit is mirrored to billing while `same_as_shipping` is on.
    /// A billing edit while it is on turns mirroring off, since billing no
    /// longer matches shipping.
    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let value = value.into();
        match field.kind() {
            AddressKind::Shipping => {
                if self.same_as_shipping {
                    self.billing.set(field.field(), value.clone());
                }
                self.shipping.set(field.field(), value);
            }
            AddressKind::Billing => {
                self.same_as_shipping = false;
                self.billing.set(field.field(), value);
            }
        }
    }

    /// Toggle "billing same as shipping". Turning it on copies shipping over
    /// billing, discarding any separate billing edits.
    pub fn set_same_as_shipping(&mut self, same: bool) {
        self.same_as_shipping = same;
        self.sync_billing();
    }

    /// Re-apply the mirror if `same_as_shipping` is on.
    ///
    /// Forms arriving from clients may omit billing entirely when the box is
    /// ticked; call this before validating them.
    pub fn sync_billing(&mut self) {
        if self.same_as_shipping {
            self.billing = self.shipping.clone();
        }
    }

    /// Store a pincode and, for domestic addresses, fill city and state from
    /// the lookup table.
    ///
    /// Returns the location used, if any.
    pub fn set_pincode(&mut self, kind: AddressKind, pincode: &str) -> Option<Location> {
        self.set_in(kind, AddressField::Pincode, pincode);

        if !self.address(kind).is_domestic() || pincode.len() != 6 {
            return None;
        }
        let found = location::location_from_pincode(pincode)?;
        self.set_in(kind, AddressField::City, found.city);
        self.set_in(kind, AddressField::State, found.state);
        Some(found)
    }

    /// Store a city picked from the suggestions, filling the state when the
    /// city is known.
    pub fn select_city(&mut self, kind: AddressKind, city: &str) -> Option<&'static str> {
        self.set_in(kind, AddressField::City, city);
        let state = location::state_from_city(city)?;
        self.set_in(kind, AddressField::State, state);
        Some(state)
    }

    /// City suggestions for the typed prefix; domestic addresses only.
    #[must_use]
    pub fn city_suggestions(&self, kind: AddressKind, input: &str) -> Vec<&'static str> {
        if self.address(kind).is_domestic() {
            location::city_suggestions(input)
        } else {
            Vec::new()
        }
    }

    /// Domestic states are filled from the pincode, so the input is locked.
    #[must_use]
    pub fn is_state_read_only(&self, kind: AddressKind) -> bool {
        self.address(kind).is_domestic()
    }

    fn set_in(&mut self, kind: AddressKind, field: AddressField, value: &str) {
        self.set(CheckoutField::new(kind, field), value);
    }
}

/// Field-level errors keyed by field. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<CheckoutField, String>);

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// True when the form can be submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: CheckoutField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckoutField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Record the outcome of re-validating one field: set its message or
    /// clear it.
    pub fn update(&mut self, field: CheckoutField, outcome: Option<&str>) {
        match outcome {
            Some(message) => {
                self.0.insert(field, message.to_owned());
            }
            None => {
                self.0.remove(&field);
            }
        }
    }
}

/// Validate every field of the form.
#[must_use]
pub fn validate_checkout_form(form: &CheckoutForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in CheckoutField::ALL {
        errors.update(field, validate_field(form, field));
    }
    errors
}

/// Validate one field, returning its error message if it fails.
#[must_use]
pub fn validate_field(form: &CheckoutForm, field: CheckoutField) -> Option<&'static str> {
    let rule = field.field();
    (!rule.accepts(form.get(field))).then(|| rule.error_message())
}

/// Non-empty after trimming whitespace.
#[must_use]
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 10-15 digits, optional leading `+`, no leading zero.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Exactly six ASCII digits.
#[must_use]
pub fn is_valid_pincode(value: &str) -> bool {
    PINCODE_RE.is_match(value)
}
