//! # QR Renderer
//!
//! Renders the coupon payload as a square QR code image.
//!
//! ## Geometry
//! ```text
//! ┌──────────────────────────────── size (300px) ───────────────────────────┐
//! │  margin (2 modules, light)                                              │
//! │    ┌─────────────────────────────────────────────────────────────┐      │
//! │    │ ■■■■■■■ □ ■ □ ■■■■■■■                                       │      │
//! │    │ ■     ■ ■ □ ■ ■     ■     N × N modules                    │      │
//! │    │ ■ ■■■ ■ □ ■ □ ■ ■■■ ■     (version picked by qrcode)       │      │
//! │    │   ...                                                       │      │
//! │    └─────────────────────────────────────────────────────────────┘      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//!   scale = size / (N + 2 × margin)      (fractional)
//!   pixel p → module floor((p - margin × scale) / scale)
//! ```
//!
//! The scale is fractional so the output is always exactly `size` pixels
//! wide, whatever version the payload needs.

use image::{DynamicImage, RgbImage};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kupon_core::DataUri;

use crate::color::Palette;
use crate::data_uri::png_data_uri;
use crate::error::{EncodingError, RenderResult};
use crate::CodeRenderer;

/// Default image width and height in pixels.
pub const DEFAULT_SIZE: u32 = 300;

/// Default quiet zone in modules.
pub const DEFAULT_MARGIN: u32 = 2;

// =============================================================================
// Options
// =============================================================================

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery.
    Low,
    /// ~15% recovery.
    #[default]
    Medium,
    /// ~25% recovery.
    Quartile,
    /// ~30% recovery.
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// QR rendering options.
///
/// Appears as the `[qr]` table of the kiosk config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Output width and height in pixels.
    pub size: u32,

    /// Quiet zone width in modules.
    pub margin: u32,

    /// Error correction level.
    pub error_correction: ErrorCorrection,

    /// Dark module color (`#RRGGBB`).
    pub dark: String,

    /// Light module color (`#RRGGBB`).
    pub light: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        QrOptions {
            size: DEFAULT_SIZE,
            margin: DEFAULT_MARGIN,
            error_correction: ErrorCorrection::Medium,
            dark: "#000000".to_string(),
            light: "#FFFFFF".to_string(),
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Renders text as a QR code image.
#[derive(Debug, Clone)]
pub struct QrRenderer {
    options: QrOptions,
    palette: Palette,
}

impl QrRenderer {
    /// Creates a renderer, validating the palette up front.
    pub fn new(options: QrOptions) -> RenderResult<Self> {
        let palette = Palette::from_hex(&options.dark, &options.light)?;
        Ok(QrRenderer { options, palette })
    }

    /// Returns the options this renderer was built with.
    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    /// Renders `payload` into a `size × size` RGB image.
    ///
    /// ## Errors
    /// - `PayloadTooLong` if no QR version at the configured level fits
    /// - `CanvasTooSmall` if `size` leaves less than one pixel per module
    pub fn render(&self, payload: &str) -> RenderResult<RgbImage> {
        let level: EcLevel = self.options.error_correction.into();
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level).map_err(
            |err| match err {
                QrError::DataTooLong => EncodingError::PayloadTooLong { len: payload.len() },
                other => other.into(),
            },
        )?;

        let modules = code.width() as u32;
        let margin = self.options.margin;
        let size = self.options.size;
        let required = modules + 2 * margin;

        if size < required {
            return Err(EncodingError::CanvasTooSmall { size, required });
        }

        let colors = code.to_colors();
        let scale = f64::from(size) / f64::from(required);
        let offset = f64::from(margin) * scale;

        debug!(modules, scale, bytes = payload.len(), "Rendering QR code");

        let module_at = |pixel: u32| -> Option<usize> {
            let index = ((f64::from(pixel) - offset) / scale).floor();
            if index >= 0.0 && index < f64::from(modules) {
                Some(index as usize)
            } else {
                None
            }
        };

        let width = modules as usize;
        let Palette { dark, light } = self.palette;

        Ok(RgbImage::from_fn(size, size, |x, y| {
            match (module_at(x), module_at(y)) {
                (Some(col), Some(row)) if colors[row * width + col] == Color::Dark => dark,
                _ => light,
            }
        }))
    }
}

impl CodeRenderer for QrRenderer {
    fn render_data_uri(&self, text: &str) -> RenderResult<DataUri> {
        let image = self.render(text)?;
        png_data_uri(DynamicImage::ImageRgb8(image))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
