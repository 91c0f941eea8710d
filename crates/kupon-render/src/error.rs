//! # Encoding Error Types
//!
//! Every way text can fail to become an image.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Encoding Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Capacity     │  │   Symbology     │  │     Output              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  PayloadTooLong │  │  Unsupported    │  │  Image                  │ │
//! │  │  CanvasTooSmall │  │   Character     │  │  InvalidDataUri         │ │
//! │  │                 │  │  EmptyText      │  │  InvalidColor           │ │
//! │  │                 │  │  Symbology      │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retried internally. They propagate to whoever asked for
//! the image.

use thiserror::Error;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, EncodingError>;

/// Failure to turn text into a code image.
#[derive(Debug, Error)]
pub enum EncodingError {
    // =========================================================================
    // Capacity Errors
    // =========================================================================
    /// The payload does not fit in the largest QR version.
    #[error("Payload of {len} bytes exceeds QR capacity")]
    PayloadTooLong { len: usize },

    /// The code needs more pixels than the target image has.
    #[error("Image of {size}px cannot hold a code of {required} modules")]
    CanvasTooSmall { size: u32, required: u32 },

    // =========================================================================
    // Symbology Errors
    // =========================================================================
    /// A character cannot be carried by the linear symbology.
    #[error("Character {character:?} cannot be encoded in CODE128")]
    UnsupportedCharacter { character: char },

    /// Nothing to encode.
    #[error("Cannot encode empty text")]
    EmptyText,

    /// The underlying encoder rejected the input.
    #[error("Symbology encoder failed: {0}")]
    Symbology(String),

    // =========================================================================
    // Output Errors
    // =========================================================================
    /// A palette entry is not a hex color.
    #[error("Invalid color '{0}', expected #RGB or #RRGGBB")]
    InvalidColor(String),

    /// PNG encoding or decoding failed.
    #[error("Image encoding failed: {0}")]
    Image(String),

    /// Not a base64 PNG data URI.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<qrcode::types::QrError> for EncodingError {
    fn from(err: qrcode::types::QrError) -> Self {
        EncodingError::Symbology(err.to_string())
    }
}

impl From<image::ImageError> for EncodingError {
    fn from(err: image::ImageError) -> Self {
        EncodingError::Image(err.to_string())
    }
}

impl From<base64::DecodeError> for EncodingError {
    fn from(err: base64::DecodeError) -> Self {
        EncodingError::InvalidDataUri(err.to_string())
    }
}

impl EncodingError {
    /// Returns true if the input text itself is the problem.
    ///
    /// Such errors repeat on every attempt with the same item.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EncodingError::PayloadTooLong { .. }
                | EncodingError::UnsupportedCharacter { .. }
                | EncodingError::EmptyText
                | EncodingError::Symbology(_)
        )
    }
}
