//! Validated payment QR payloads.
//!
//! A [`PaymentQr`] pairs a [`PaymentRequest`] with its [`RenderHints`] after
//! both have passed validation. It is immutable; to change a field, build a
//! new payload and render again.

use crate::render::{ErrorCorrection, QrRenderer, RenderHints};
use crate::validation::{
    validate_address, validate_amount, validate_hints, validate_request, validate_show_logo,
    validate_size, validate_vendor_field,
};
use crate::{uri, BexQrError, PaymentRequest, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Keys that count as payment fields when loading from JSON.
const PAYMENT_KEYS: [&str; 4] = ["address", "amount", "label", "vendorField"];

/// A payment request and its render hints, validated together.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentQr {
    request: PaymentRequest,
    hints: RenderHints,
}

impl PaymentQr {
    /// Validate `request` and `hints` and pair them.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: address, amount, vendor field, size,
    /// then logo.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(request), fields(address = %request.address))
    )]
    pub fn new(request: PaymentRequest, hints: RenderHints) -> Result<Self> {
        validate_request(&request)?;
        validate_hints(&hints)?;
        Ok(Self { request, hints })
    }

    /// Load a payload from a loosely typed JSON object.
    ///
    /// Recognised keys are `address`, `amount`, `label`, `vendorField`, `size`
    /// and `showLogo`; `null` counts as absent. `amount` may be a number or a
    /// numeric string.
    ///
    /// # Errors
    ///
    /// Returns [`BexQrError::NotLoaded`] if `data` is not an object or carries
    /// none of the payment keys. Otherwise type and format errors are reported
    /// per field, in the same order as [`PaymentQr::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use bexqr_lib::PaymentQr;
    /// use serde_json::json;
    ///
    /// let qr = PaymentQr::from_value(&json!({
    ///     "address": "BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j",
    ///     "amount": "2.5",
    ///     "size": 200,
    ///     "showLogo": true,
    /// }))?;
    /// assert_eq!(qr.uri()?, "ark:BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j?amount=2.5");
    /// # Ok::<(), bexqr_lib::BexQrError>(())
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(data)))]
    pub fn from_value(data: &Value) -> Result<Self> {
        let object = data.as_object().ok_or(BexQrError::NotLoaded)?;
        if PAYMENT_KEYS.iter().all(|key| field(object, key).is_none()) {
            return Err(BexQrError::NotLoaded);
        }

        let address = match field(object, "address") {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(BexQrError::InvalidAddress("must be a string".to_string())),
        };
        validate_address(&address)?;

        let amount = amount_from(field(object, "amount"))?;
        if let Some(amount) = amount {
            validate_amount(amount)?;
        }

        let label = match field(object, "label") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        let vendor_field = match field(object, "vendorField") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(BexQrError::InvalidVendorField(
                    "must be a UTF-8 encoded string".to_string(),
                ))
            }
        };
        if let Some(vendor_field) = &vendor_field {
            validate_vendor_field(vendor_field)?;
        }

        let defaults = RenderHints::default();
        let size = match field(object, "size") {
            None => defaults.size,
            Some(value) => validate_size(value)?,
        };

        let show_logo = match field(object, "showLogo") {
            None => defaults.show_logo,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(BexQrError::InvalidShowLogo(
                    "must be a boolean".to_string(),
                ))
            }
        };
        validate_show_logo(show_logo, size)?;

        let mut request = PaymentRequest::new(address);
        request.amount = amount;
        if let Some(label) = label {
            request = request.with_label(label);
        }
        if let Some(vendor_field) = vendor_field {
            request = request.with_vendor_field(vendor_field);
        }

        Self::new(request, RenderHints::new(size, show_logo))
    }

    /// The validated payment request.
    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    /// The validated render hints.
    pub fn hints(&self) -> &RenderHints {
        &self.hints
    }

    /// Canonical `ark:` URI for this payload.
    pub fn uri(&self) -> Result<String> {
        uri::encode(&self.request)
    }

    /// Error-correction level the renderer should use.
    pub fn error_correction(&self) -> ErrorCorrection {
        self.hints.error_correction()
    }

    /// Render the URI with `renderer`, honouring the render hints.
    pub fn render(&self, renderer: &dyn QrRenderer) -> Result<String> {
        let uri = self.uri()?;
        renderer.render(&uri, &self.hints.options())
    }

    /// Render as SVG and wrap it in a `data:` URL.
    #[cfg(feature = "render")]
    pub fn svg_data_url(&self) -> Result<String> {
        let svg = self.render(&crate::render::SvgRenderer)?;
        Ok(format!(
            "data:image/svg+xml,{}",
            crate::encoding::encode_component(&svg)
        ))
    }
}

fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn amount_from(value: Option<&Value>) -> Result<Option<f64>> {
    let invalid = || BexQrError::InvalidAmount("invalid amount".to_string());
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BexQrErrorCode;
    use serde_json::json;

    const ADDRESS: &str = "BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j";

    #[test]
    fn test_new_validates_everything() {
        let request = PaymentRequest::new(ADDRESS);
        assert!(PaymentQr::new(request.clone(), RenderHints::default()).is_ok());

        let err = PaymentQr::new(request, RenderHints::new(100, true)).unwrap_err();
        assert_eq!(err.code(), BexQrErrorCode::InvalidShowLogo);
    }

    #[test]
    fn test_from_value_full() {
        let qr = PaymentQr::from_value(&json!({
            "address": ADDRESS,
            "amount": 5,
            "label": "shop",
            "vendorField": "Hello!",
            "size": 250,
            "showLogo": true,
        }))
        .unwrap();

        assert_eq!(qr.hints(), &RenderHints::new(250, true));
        assert_eq!(qr.error_correction(), ErrorCorrection::Medium);
        assert_eq!(
            qr.uri().unwrap(),
            format!("ark:{}?amount=5&label=shop&vendorField=Hello%21", ADDRESS)
        );
    }

    #[test]
    fn test_from_value_not_loaded() {
        assert_eq!(
            PaymentQr::from_value(&json!({})).unwrap_err(),
            BexQrError::NotLoaded
        );
        assert_eq!(
            PaymentQr::from_value(&json!({"size": 200, "address": null})).unwrap_err(),
            BexQrError::NotLoaded
        );
        assert_eq!(
            PaymentQr::from_value(&json!("ark:..."))
                .unwrap_err()
                .code(),
            BexQrErrorCode::NotLoaded
        );
    }

    #[test]
    fn test_from_value_missing_address() {
        let err = PaymentQr::from_value(&json!({"amount": 1})).unwrap_err();
        assert_eq!(err, BexQrError::InvalidAddress("required".to_string()));
    }

    #[test]
    fn test_from_value_type_errors() {
        let cases = [
            (json!({"address": 42}), BexQrErrorCode::InvalidAddress),
            (
                json!({"address": ADDRESS, "amount": "five"}),
                BexQrErrorCode::InvalidAmount,
            ),
            (
                json!({"address": ADDRESS, "amount": [1]}),
                BexQrErrorCode::InvalidAmount,
            ),
            (
                json!({"address": ADDRESS, "vendorField": 7}),
                BexQrErrorCode::InvalidVendorField,
            ),
            (
                json!({"address": ADDRESS, "size": "big"}),
                BexQrErrorCode::InvalidSize,
            ),
            (
                json!({"address": ADDRESS, "size": 1.5}),
                BexQrErrorCode::InvalidSize,
            ),
            (
                json!({"address": ADDRESS, "size": 200, "showLogo": "yes"}),
                BexQrErrorCode::InvalidShowLogo,
            ),
        ];

        for (data, expected) in cases {
            let err = PaymentQr::from_value(&data).unwrap_err();
            assert_eq!(err.code(), expected, "for {}", data);
        }
    }

    #[test]
    fn test_from_value_amount_string_and_label_scalar() {
        let qr = PaymentQr::from_value(&json!({
            "address": ADDRESS,
            "amount": " 0.5 ",
            "label": 12,
        }))
        .unwrap();
        assert_eq!(qr.request().amount, Some(0.5));
        assert_eq!(qr.request().label.as_deref(), Some("12"));
    }

    #[test]
    fn test_from_value_logo_needs_size() {
        let err = PaymentQr::from_value(&json!({"address": ADDRESS, "showLogo": true}))
            .unwrap_err();
        assert_eq!(err.code(), BexQrErrorCode::InvalidShowLogo);

        let qr = PaymentQr::from_value(&json!({"address": ADDRESS, "showLogo": true, "size": 150}));
        assert!(qr.is_ok());
    }

    struct EchoRenderer;

    impl QrRenderer for EchoRenderer {
        fn render(&self, uri: &str, options: &crate::RenderOptions) -> Result<String> {
            Ok(format!("{}|{}|{}", uri, options.size, options.error_correction.as_str()))
        }
    }

    #[test]
    fn test_render_passes_uri_and_hints() {
        let qr = PaymentQr::new(
            PaymentRequest::new(ADDRESS).with_amount(1.0),
            RenderHints::new(300, true),
        )
        .unwrap();
        assert_eq!(
            qr.render(&EchoRenderer).unwrap(),
            format!("ark:{}?amount=1|300|M", ADDRESS)
        );
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_svg_data_url() {
        let qr = PaymentQr::new(PaymentRequest::new(ADDRESS), RenderHints::default()).unwrap();
        let url = qr.svg_data_url().unwrap();
        assert!(url.starts_with("data:image/svg+xml,"));
        assert!(url.contains("%3Csvg"));
    }
}
