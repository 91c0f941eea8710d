//! # kupon-render: Code Rendering for Kupon
//!
//! Converts coupon text into displayable images.
//!
//! ## Rendering Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Rendering Pipeline                              │
//! │                                                                         │
//! │  QR payload (JSON text)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  qrcode: module grid (EC level M) ──► scale to 300×300, 2-module margin │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PNG ──► data:image/png;base64,...  ──► GeneratedCode.qrCode           │
//! │                                                                         │
//! │  code + price ("ABC12315000")                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  barcoders: CODE128 modules ──► 2px bars, 128px tall, 5px margin        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rotate 90° clockwise ──► centered on (height + 10) × 128 canvas        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PNG ──► data:image/png;base64,...  ──► display layer                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`qr`] - 2D code renderer
//! - [`barcode`] - Linear code renderer with vertical rotation
//! - [`color`] - Palette parsing
//! - [`data_uri`] - PNG data URI encoding and decoding
//! - [`error`] - `EncodingError`
//!
//! Every renderer is a pure function of its options and input text, so the
//! same input always yields the same pixels.

pub mod barcode;
pub mod color;
pub mod data_uri;
pub mod error;
pub mod qr;

pub use barcode::{BarcodeOptions, LinearRenderer};
pub use color::Palette;
pub use error::{EncodingError, RenderResult};
pub use qr::{ErrorCorrection, QrOptions, QrRenderer};

use kupon_core::DataUri;

/// Something that renders text into an inline image.
///
/// The session layer holds renderers behind this trait so issuance does not
/// care which symbology sits underneath.
pub trait CodeRenderer: Send + Sync {
    /// Renders `text` and returns a PNG data URI.
    fn render_data_uri(&self, text: &str) -> RenderResult<DataUri>;
}
