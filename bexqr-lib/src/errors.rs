//! Error types for bexqr operations.
//!
//! Field-level validation failures are raised synchronously at the offending
//! field. Structural URI mismatches are never errors: `uri::decode` returns
//! `None` instead.

/// Error codes for FFI and embedding integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum BexQrErrorCode {
    /// Recipient address missing or malformed
    InvalidAddress = 1001,
    /// Amount is not a representable number
    InvalidAmount = 1002,
    /// Vendor field not text or too long once decoded
    InvalidVendorField = 1003,
    /// Size hint is not numeric
    InvalidSize = 1004,
    /// Logo flag not boolean or incompatible with size
    InvalidShowLogo = 1005,
    /// Payload was never loaded with any payment field
    NotLoaded = 2000,
    /// QR rendering collaborator failed or is missing
    RenderUnavailable = 3000,
}

/// Error type for bexqr operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BexQrError {
    /// Recipient address missing or not a valid ark recipient.
    #[error("address: {0}")]
    InvalidAddress(String),

    /// Amount cannot be represented as a number.
    #[error("amount: {0}")]
    InvalidAmount(String),

    /// Vendor field is not text or exceeds the decoded length limit.
    #[error("vendorField: {0}")]
    InvalidVendorField(String),

    /// Size hint is not a number.
    #[error("size: {0}")]
    InvalidSize(String),

    /// Logo flag is not a boolean, or the size is too small to fit the logo.
    #[error("show-logo: {0}")]
    InvalidShowLogo(String),

    /// A URI was requested from a payload that carries no payment fields.
    #[error("payment request not loaded")]
    NotLoaded,

    /// The QR renderer could not produce an image.
    #[error("render unavailable: {0}")]
    RenderUnavailable(String),
}

impl BexQrError {
    /// Get the error code for FFI/embedding integration.
    pub fn code(&self) -> BexQrErrorCode {
        match self {
            Self::InvalidAddress(_) => BexQrErrorCode::InvalidAddress,
            Self::InvalidAmount(_) => BexQrErrorCode::InvalidAmount,
            Self::InvalidVendorField(_) => BexQrErrorCode::InvalidVendorField,
            Self::InvalidSize(_) => BexQrErrorCode::InvalidSize,
            Self::InvalidShowLogo(_) => BexQrErrorCode::InvalidShowLogo,
            Self::NotLoaded => BexQrErrorCode::NotLoaded,
            Self::RenderUnavailable(_) => BexQrErrorCode::RenderUnavailable,
        }
    }

    /// Name of the request field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAddress(_) => Some("address"),
            Self::InvalidAmount(_) => Some("amount"),
            Self::InvalidVendorField(_) => Some("vendorField"),
            Self::InvalidSize(_) => Some("size"),
            Self::InvalidShowLogo(_) => Some("showLogo"),
            Self::NotLoaded | Self::RenderUnavailable(_) => None,
        }
    }

    /// Returns true for errors caused by a single bad input field.
    pub fn is_validation(&self) -> bool {
        self.field().is_some()
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Create a render error from any error type.
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        Self::RenderUnavailable(err.to_string())
    }
}
