//! Location lookups.

use std::io::Write;

use bazaar_core::location::{city_suggestions, location_from_pincode, state_from_city};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unknown pincode: {0}")]
    UnknownPincode(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Print the city and state for `code`.
///
/// # Errors
///
/// Returns [`LookupError::UnknownPincode`] if the pincode is not in the table.
pub fn pincode(code: &str, out: &mut impl Write) -> Result<(), LookupError> {
    let code = code.trim();
    let location =
        location_from_pincode(code).ok_or_else(|| LookupError::UnknownPincode(code.to_owned()))?;
    writeln!(out, "{code}: {}, {}", location.city, location.state)?;
    Ok(())
}

/// Print every city matching `query`, with its state.
///
/// # Errors
///
/// Returns an error only if writing fails.
pub fn cities(query: &str, out: &mut impl Write) -> Result<(), LookupError> {
    let matches = city_suggestions(query.trim());
    if matches.is_empty() {
        tracing::info!(query, "No matching cities");
    }
    for city in matches {
        match state_from_city(city) {
            Some(state) => writeln!(out, "{city}, {state}")?,
            None => writeln!(out, "{city}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pincode() {
        let mut out = Vec::new();
        pincode(" 110001 ", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "110001: Delhi, Delhi\n");

        assert!(matches!(
            pincode("999999", &mut Vec::new()),
            Err(LookupError::UnknownPincode(_))
        ));
    }

    #[test]
    fn test_cities() {
        let mut out = Vec::new();
        cities("PUR", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Jaipur, Rajasthan"));
        assert!(text.contains("Nagpur, Maharashtra"));
    }
}
