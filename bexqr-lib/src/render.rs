//! QR rendering seam.
//!
//! The codec only produces URI strings. Turning one into a scannable image is
//! the job of a [`QrRenderer`]; the built-in renderers delegate matrix
//! generation to the `qrcode` crate and are available with the `render`
//! feature (enabled by default).

use crate::Result;
use serde::{Deserialize, Serialize};

/// Rendering hints carried alongside a payment request.
///
/// They never affect the URI, only the rendered image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderHints {
    /// Target edge length in pixels.
    #[serde(default = "default_size")]
    pub size: u32,

    /// Whether a logo is composited over the centre of the code.
    #[serde(default)]
    pub show_logo: bool,
}

fn default_size() -> u32 {
    100
}

impl Default for RenderHints {
    fn default() -> Self {
        Self {
            size: default_size(),
            show_logo: false,
        }
    }
}

impl RenderHints {
    /// Create render hints.
    pub fn new(size: u32, show_logo: bool) -> Self {
        Self { size, show_logo }
    }

    /// Error-correction level needed for these hints.
    ///
    /// A centre logo hides modules, so it needs the medium level.
    pub fn error_correction(&self) -> ErrorCorrection {
        if self.show_logo {
            ErrorCorrection::Medium
        } else {
            ErrorCorrection::Low
        }
    }

    /// Options to hand to a renderer.
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            size: self.size,
            error_correction: self.error_correction(),
        }
    }
}

/// QR error-correction level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery.
    #[default]
    Low,
    /// ~15% recovery.
    Medium,
}

impl ErrorCorrection {
    /// Single-letter level name (`L`, `M`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "L",
            Self::Medium => "M",
        }
    }
}

/// Parameters passed to a [`QrRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Target edge length in pixels. Text renderers may ignore it.
    pub size: u32,
    /// Error-correction level for the QR matrix.
    pub error_correction: ErrorCorrection,
}

/// Turns a payment URI into an image representation.
pub trait QrRenderer {
    /// Render `uri` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`BexQrError::RenderUnavailable`](crate::BexQrError::RenderUnavailable)
    /// when the payload cannot be rendered.
    fn render(&self, uri: &str, options: &RenderOptions) -> Result<String>;
}

#[cfg(feature = "render")]
mod qrcode_renderers {
    use super::{ErrorCorrection, QrRenderer, RenderOptions};
    use crate::{BexQrError, Result};
    use qrcode::render::{svg, unicode};
    use qrcode::{EcLevel, QrCode};

    fn build(uri: &str, level: ErrorCorrection) -> Result<QrCode> {
        let level = match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
        };
        QrCode::with_error_correction_level(uri.as_bytes(), level).map_err(BexQrError::render)
    }

    /// Renders QR codes as terminal text using half-block characters.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TextRenderer {
        /// Surround the code with the standard quiet zone.
        pub quiet_zone: bool,
    }

    impl TextRenderer {
        /// Create a text renderer without a quiet zone.
        pub fn new() -> Self {
            Self::default()
        }

        /// Enable or disable the quiet zone.
        pub fn with_quiet_zone(mut self, quiet_zone: bool) -> Self {
            self.quiet_zone = quiet_zone;
            self
        }
    }

    impl QrRenderer for TextRenderer {
        fn render(&self, uri: &str, options: &RenderOptions) -> Result<String> {
            let code = build(uri, options.error_correction)?;
            Ok(code
                .render::<unicode::Dense1x2>()
                .quiet_zone(self.quiet_zone)
                .build())
        }
    }

    /// Renders QR codes as standalone SVG documents.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SvgRenderer;

    impl QrRenderer for SvgRenderer {
        fn render(&self, uri: &str, options: &RenderOptions) -> Result<String> {
            let code = build(uri, options.error_correction)?;
            Ok(code
                .render::<svg::Color>()
                .min_dimensions(options.size, options.size)
                .build())
        }
    }
}

#[cfg(feature = "render")]
pub use qrcode_renderers::{SvgRenderer, TextRenderer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hints() {
        let hints = RenderHints::default();
        assert_eq!(hints.size, 100);
        assert!(!hints.show_logo);
        assert_eq!(hints.error_correction(), ErrorCorrection::Low);
    }

    #[test]
    fn test_logo_raises_error_correction() {
        let hints = RenderHints::new(200, true);
        assert_eq!(hints.error_correction().as_str(), "M");
        assert_eq!(hints.options().size, 200);
    }

    #[test]
    fn test_hints_serde_defaults() {
        let hints: RenderHints = serde_json::from_str("{}").unwrap();
        assert_eq!(hints, RenderHints::default());

        let hints: RenderHints = serde_json::from_str(r#"{"size":300,"showLogo":true}"#).unwrap();
        assert_eq!(hints, RenderHints::new(300, true));
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_text_renderer() {
        let options = RenderHints::default().options();
        let text = TextRenderer::new()
            .render("ark:BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j", &options)
            .unwrap();
        assert!(!text.is_empty());
        assert!(text.lines().count() > 5);

        let padded = TextRenderer::new()
            .with_quiet_zone(true)
            .render("ark:BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j", &options)
            .unwrap();
        assert!(padded.lines().count() > text.lines().count());
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_svg_renderer() {
        let options = RenderHints::new(200, true).options();
        let svg = SvgRenderer
            .render("ark:BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j?amount=5", &options)
            .unwrap();
        assert!(svg.contains("<svg"));
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_payload_too_long() {
        let options = RenderHints::default().options();
        let uri = format!("ark:{}", "x".repeat(8000));
        let err = SvgRenderer.render(&uri, &options).unwrap_err();
        assert_eq!(err.code(), crate::BexQrErrorCode::RenderUnavailable);
    }
}
