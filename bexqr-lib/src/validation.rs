//! Field validation for payment requests and render hints.
//!
//! Every check is pure and fail-fast: the first offending field is reported
//! and nothing is corrected on the caller's behalf.

use crate::encoding::fully_decode;
use crate::render::RenderHints;
use crate::{BexQrError, PaymentRequest, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Maximum length of a fully decoded vendor field, in characters.
pub const MAX_VENDOR_FIELD_CHARS: usize = 64;

/// Smallest size hint that leaves room for the centre logo.
pub const MIN_LOGO_SIZE: u32 = 150;

static RECIPIENT_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[Bb][0-9A-Za-z]{33}$").expect("static regex"));

/// Validates a recipient address.
///
/// A valid recipient starts with `B` or `b` followed by exactly 33 ASCII
/// alphanumerics.
pub fn validate_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(BexQrError::InvalidAddress("required".to_string()));
    }
    if !RECIPIENT_ADDRESS.is_match(address) {
        return Err(BexQrError::InvalidAddress(
            "not valid ark recipient".to_string(),
        ));
    }
    Ok(())
}

/// Validates that an amount is a representable number.
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(BexQrError::InvalidAmount("invalid amount".to_string()));
    }
    Ok(())
}

/// Validates a vendor field against the decoded length limit.
pub fn validate_vendor_field(vendor_field: &str) -> Result<()> {
    let decoded = fully_decode(vendor_field).map_err(|e| {
        BexQrError::InvalidVendorField(format!("must be a UTF-8 encoded string ({})", e))
    })?;

    if decoded.chars().count() > MAX_VENDOR_FIELD_CHARS {
        return Err(BexQrError::InvalidVendorField(format!(
            "enter no more than {} characters",
            MAX_VENDOR_FIELD_CHARS
        )));
    }
    Ok(())
}

/// Validates a loosely typed size hint and returns it as pixels.
///
/// The size must be a non-negative whole number that fits a `u32`. Typed
/// [`RenderHints`] need no check since their size is numeric by construction.
pub fn validate_size(size: &Value) -> Result<u32> {
    let invalid = || BexQrError::InvalidSize("must be a number".to_string());
    let n = size.as_f64().ok_or_else(invalid)?;
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok(n as u32)
}

/// Validates the logo flag against the size hint.
pub fn validate_show_logo(show_logo: bool, size: u32) -> Result<()> {
    if show_logo && size < MIN_LOGO_SIZE {
        return Err(BexQrError::InvalidShowLogo(format!(
            "to display the logo the size must be at least {}",
            MIN_LOGO_SIZE
        )));
    }
    Ok(())
}

/// Runs every payment-field check in order: address, amount, vendor field.
pub fn validate_request(request: &PaymentRequest) -> Result<()> {
    validate_address(&request.address)?;
    if let Some(amount) = request.amount {
        validate_amount(amount)?;
    }
    if let Some(vendor_field) = &request.vendor_field {
        validate_vendor_field(vendor_field)?;
    }
    Ok(())
}

/// Runs the render-hint checks on typed hints.
pub fn validate_hints(hints: &RenderHints) -> Result<()> {
    validate_show_logo(hints.show_logo, hints.size)
}
