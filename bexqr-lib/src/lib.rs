//! bexqr library.
//!
//! Canonical `ark:` payment URIs for QR codes: field validation, a reversible
//! URI codec, and a renderer seam that hands the URI to a QR image backend.
//! Everything here is stateless; values are built once and passed through.
//!
//! # Example
//!
//! ```
//! use bexqr_lib::{PaymentQr, PaymentRequest, RenderHints};
//!
//! let request = PaymentRequest::new("BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j").with_amount(10.0);
//! let qr = PaymentQr::new(request, RenderHints::default())?;
//!
//! assert_eq!(qr.uri()?, "ark:BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j?amount=10");
//! # Ok::<(), bexqr_lib::BexQrError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod encoding;
pub mod errors;
pub mod prelude;
pub mod qr;
pub mod render;
pub mod uri;
pub mod validation;

pub use errors::{BexQrError, BexQrErrorCode};
pub use qr::PaymentQr;
pub use render::{ErrorCorrection, QrRenderer, RenderHints, RenderOptions};
pub use uri::{decode, encode, matches};

#[cfg(feature = "render")]
pub use render::{SvgRenderer, TextRenderer};

/// Common result alias for bexqr operations.
pub type Result<T> = std::result::Result<T, BexQrError>;

/// The payment fields carried by an `ark:` URI.
///
/// A plain value: construct it, validate it (or let [`uri::encode`] do so),
/// and construct a new one when any field changes.
///
/// # Example
///
/// ```
/// use bexqr_lib::PaymentRequest;
///
/// let request = PaymentRequest::new("BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j")
///     .with_label("coffee")
///     .with_vendor_field("order 42");
///
/// assert_eq!(request.amount, None);
/// assert_eq!(request.label.as_deref(), Some("coffee"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Recipient address.
    pub address: String,
    /// Amount to pay, if requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Free-text label for the recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Memo attached to the payment; at most 64 characters once decoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_field: Option<String>,
}

impl PaymentRequest {
    /// Create a request for `address` with no optional fields.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: None,
            label: None,
            vendor_field: None,
        }
    }

    /// Set the amount.
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the label. An empty label is treated as absent.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = non_empty(label.into());
        self
    }

    /// Set the vendor field. An empty vendor field is treated as absent.
    pub fn with_vendor_field(mut self, vendor_field: impl Into<String>) -> Self {
        self.vendor_field = non_empty(vendor_field.into());
        self
    }

    /// Returns true if any field besides the address is set.
    pub fn has_params(&self) -> bool {
        self.amount.is_some() || self.label.is_some() || self.vendor_field.is_some()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
