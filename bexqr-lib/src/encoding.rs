//! Percent-encoding helpers shared by the validator and the URI codec.
//!
//! Values that arrive through QR scans are frequently encoded more than once.
//! [`fully_decode`] strips every layer so that the encoder never double-encodes
//! and the decoder always returns plain text.

use std::borrow::Cow;

/// Upper bound on decode passes before the input is rejected.
pub const MAX_DECODE_PASSES: usize = 32;

/// Failure to normalize a percent-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A `%` that is not followed by two hex digits.
    #[error("malformed percent sequence at byte {position}")]
    Malformed {
        /// Byte offset of the offending `%` in the pass that failed.
        position: usize,
    },
    /// The decoded bytes are not valid UTF-8.
    #[error("decoded value is not valid UTF-8")]
    InvalidUtf8,
    /// The value still changed after [`MAX_DECODE_PASSES`] passes.
    #[error("value did not stabilize after {} decode passes", MAX_DECODE_PASSES)]
    Unstable,
}

/// Repeatedly percent-decode `value` until a pass produces no change.
///
/// `+` is left untouched; only `%XX` escapes are decoded.
///
/// # Errors
///
/// Returns an error for malformed escapes, non UTF-8 output, or input nested
/// deeper than [`MAX_DECODE_PASSES`].
///
/// # Examples
///
/// ```
/// use bexqr_lib::encoding::fully_decode;
///
/// assert_eq!(fully_decode("Hello%2521").unwrap(), "Hello!");
/// assert_eq!(fully_decode("plain").unwrap(), "plain");
/// assert!(fully_decode("100%").is_err());
/// ```
pub fn fully_decode(value: &str) -> Result<String, DecodeError> {
    let mut current = value.to_string();

    for _ in 0..=MAX_DECODE_PASSES {
        let next = decode_once(&current)?;
        if next == current {
            return Ok(current);
        }
        current = next;
    }

    Err(DecodeError::Unstable)
}

/// Percent-encode everything except ASCII alphanumerics and `-_.~`.
///
/// ```
/// use bexqr_lib::encoding::encode_component;
///
/// assert_eq!(encode_component("Hello!"), "Hello%21");
/// assert_eq!(encode_component("a b"), "a%20b");
/// ```
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Single strict decode pass.
fn decode_once(value: &str) -> Result<String, DecodeError> {
    check_escapes(value)?;

    match urlencoding::decode(value) {
        Ok(Cow::Borrowed(s)) => Ok(s.to_string()),
        Ok(Cow::Owned(s)) => Ok(s),
        Err(_) => Err(DecodeError::InvalidUtf8),
    }
}

/// `urlencoding` passes malformed escapes through verbatim; reject them instead.
fn check_escapes(value: &str) -> Result<(), DecodeError> {
    let bytes = value.as_bytes();

    for (position, byte) in bytes.iter().enumerate() {
        if *byte != b'%' {
            continue;
        }
        let well_formed = bytes.len() > position + 2
            && bytes[position + 1].is_ascii_hexdigit()
            && bytes[position + 2].is_ascii_hexdigit();
        if !well_formed {
            return Err(DecodeError::Malformed { position });
        }
    }

    Ok(())
}
