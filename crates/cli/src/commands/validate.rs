//! Checkout form validation from a YAML file.
//!
//! The file uses the same field names as the storefront's JSON:
//!
//! ```yaml
//! paymentMethod: cash_on_delivery
//! sameAsShipping: true
//! shipping:
//!   name: Asha Rao
//!   email: asha@example.in
//!   phone: "9123456789"
//!   address: 12 MG Road
//!   city: Bangalore
//!   state: Karnataka
//!   pincode: "560001"
//! ```

use std::io::Write;
use std::path::Path;

use bazaar_core::{CheckoutForm, ValidationErrors, validate_checkout_form};
use thiserror::Error;

/// Errors that can occur while validating a form file.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} field(s) failed validation")]
    Invalid(usize),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Validate the form at `path` and report each failing field.
///
/// # Errors
///
/// Returns [`ValidateError::Invalid`] when any field fails, after writing
/// the report.
pub fn run(path: &Path, out: &mut impl Write) -> Result<(), ValidateError> {
    let content = std::fs::read_to_string(path).map_err(|source| ValidateError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let errors = check(&content)?;
    report(&errors, out)?;

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid(errors.len()))
    }
}

/// Parse and validate a YAML form, mirroring billing from shipping when the
/// form asks for it.
fn check(yaml: &str) -> Result<ValidationErrors, serde_yaml::Error> {
    let mut form: CheckoutForm = serde_yaml::from_str(yaml)?;
    form.sync_billing();
    tracing::debug!(payment_method = %form.payment_method, "Form parsed");
    Ok(validate_checkout_form(&form))
}

fn report(errors: &ValidationErrors, out: &mut impl Write) -> std::io::Result<()> {
    if errors.is_empty() {
        return writeln!(out, "Form is valid");
    }
    for (field, message) in errors.iter() {
        writeln!(out, "{field}: {message}")?;
    }
    Ok(())
}
