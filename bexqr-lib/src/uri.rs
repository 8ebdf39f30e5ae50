//! Ark payment URI codec.
//!
//! Wire format:
//!
//! ```text
//! ark:<address>[?amount=<num>][&label=<text>][&vendorField=<percent-encoded text>]
//! ```
//!
//! Parameters appear only when set, always in the order above.
//!
//! # Examples
//!
//! ```rust
//! use bexqr_lib::uri::{decode, encode, matches};
//! use bexqr_lib::PaymentRequest;
//!
//! let request = PaymentRequest::new("BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j")
//!     .with_amount(5.0)
//!     .with_vendor_field("Hello!");
//!
//! let uri = encode(&request)?;
//! assert_eq!(
//!     uri,
//!     "ark:BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j?amount=5&vendorField=Hello%21"
//! );
//! assert!(matches(&uri));
//! assert_eq!(decode(&uri), Some(request));
//! # Ok::<(), bexqr_lib::BexQrError>(())
//! ```

use crate::encoding::{encode_component, fully_decode};
use crate::validation::validate_request;
use crate::{PaymentRequest, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// URI scheme prefix, including the colon.
pub const SCHEME: &str = "ark:";

// Decode accepts A/D-prefixed addresses as well as the B prefix the encoder emits.
static PAYMENT_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ark:([AaBbDd][0-9A-Za-z]{33})([-A-Za-z0-9+&@#/%=~_|$?!:,.]*)$")
        .expect("static regex")
});

static QUERY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^?=&]+)(=([^&]*))?").expect("static regex"));

/// Serialize a payment request into its canonical URI.
///
/// The request is validated first; the first invalid field is returned as the
/// error.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(request), fields(address = %request.address))
)]
pub fn encode(request: &PaymentRequest) -> Result<String> {
    validate_request(request)?;

    let mut params = Vec::new();
    if let Some(amount) = request.amount {
        params.push(format!("amount={}", amount));
    }
    if let Some(label) = request.label.as_deref().filter(|l| !l.is_empty()) {
        params.push(format!("label={}", label));
    }
    if let Some(vendor_field) = request.vendor_field.as_deref().filter(|v| !v.is_empty()) {
        // Already checked by validate_request, so decoding cannot fail here.
        let plain = fully_decode(vendor_field).unwrap_or_else(|_| vendor_field.to_string());
        params.push(format!("vendorField={}", encode_component(&plain)));
    }

    let query = if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    };

    Ok(format!("{}{}{}", SCHEME, request.address, query))
}

/// Returns true if `uri` is a well-formed ark payment URI.
pub fn matches(uri: &str) -> bool {
    PAYMENT_URI.is_match(uri)
}

/// Parse a payment URI back into its fields.
///
/// Returns `None` when the URI does not match the payment URI grammar or when
/// a label or vendor field cannot be percent-decoded. Unknown query keys are
/// dropped and the last occurrence of a repeated key wins.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(uri), fields(uri_len = uri.len()))
)]
pub fn decode(uri: &str) -> Option<PaymentRequest> {
    let Some(captures) = PAYMENT_URI.captures(uri) else {
        #[cfg(feature = "tracing")]
        tracing::debug!("not an ark payment URI");
        return None;
    };

    let address = captures.get(1).map(|m| m.as_str())?.to_string();
    let suffix = captures.get(2).map_or("", |m| m.as_str());
    let mut query = parse_query(suffix);

    let mut take = |key: &str| query.remove(key).flatten().filter(|v| !v.is_empty());

    let amount = take("amount").and_then(|raw| parse_amount(&raw));
    let label = match take("label") {
        Some(raw) => Some(decode_param("label", &raw)?),
        None => None,
    };
    let vendor_field = match take("vendorField") {
        Some(raw) => Some(decode_param("vendorField", &raw)?),
        None => None,
    };

    Some(PaymentRequest {
        address,
        amount,
        label,
        vendor_field,
    })
}

/// Everything after the address in a payment URI.
///
/// This is the text [`decode`] reads parameters from. It need not start with
/// `?`. Returns `None` when `uri` is not a payment URI.
pub fn query_suffix(uri: &str) -> Option<&str> {
    let captures = PAYMENT_URI.captures(uri)?;
    Some(captures.get(2).map_or("", |m| m.as_str()))
}

/// Split a query-like suffix into key/value pairs.
///
/// A key without `=` maps to `None`. Later occurrences overwrite earlier ones.
pub fn parse_query(suffix: &str) -> HashMap<String, Option<String>> {
    QUERY_TOKEN
        .captures_iter(suffix)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_string();
            let value = caps.get(3).map(|m| m.as_str().to_string());
            Some((key, value))
        })
        .collect()
}

fn parse_amount(raw: &str) -> Option<f64> {
    let parsed = raw.parse::<f64>().ok().filter(|a| a.is_finite());
    if parsed.is_none() {
        #[cfg(feature = "tracing")]
        tracing::debug!(amount = %raw, "ignoring non-numeric amount");
    }
    parsed
}

fn decode_param(_name: &str, value: &str) -> Option<String> {
    match fully_decode(value) {
        Ok(decoded) => Some(decoded),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(param = _name, "rejecting URI: {}", _e);
            None
        }
    }
}
