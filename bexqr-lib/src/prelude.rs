//! Prelude module for convenient imports.
//!
//! ```rust
//! use bexqr_lib::prelude::*;
//! ```

// Core types
pub use crate::{PaymentQr, PaymentRequest};

// Error handling
pub use crate::errors::{BexQrError, BexQrErrorCode};
pub use crate::Result;

// URI codec
pub use crate::encoding::fully_decode;
pub use crate::uri::{decode, encode, matches};

// Validation
pub use crate::validation::{validate_hints, validate_request};

// Rendering
pub use crate::render::{ErrorCorrection, QrRenderer, RenderHints, RenderOptions};

#[cfg(feature = "render")]
pub use crate::render::{SvgRenderer, TextRenderer};
