//! # Error Types
//!
//! Domain-specific error types for kupon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kupon-core errors (this file)                                         │
//! │  ├── CoreError        - Payload / issuance failures                    │
//! │  └── ValidationError  - Input boundary failures                        │
//! │                                                                         │
//! │  kupon-render errors (separate crate)                                  │
//! │  └── EncodingError    - Payload does not fit the symbology             │
//! │                                                                         │
//! │  kupon-session errors (separate crate)                                 │
//! │  ├── SessionError     - issue / refresh / config failures              │
//! │  └── ClipboardError   - copy-to-clipboard failures (never fatal)       │
//! │                                                                         │
//! │  Flow: CoreError / EncodingError → SessionError → ApiError → Display   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, code, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core coupon logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The QR payload could not be serialized.
    ///
    /// ## When This Occurs
    /// Practically never: every payload field is a plain string or integer.
    #[error("Failed to serialize payload: {0}")]
    PayloadSerialization(String),

    /// A payload string could not be read back.
    #[error("Failed to parse payload: {0}")]
    PayloadParse(String),

    /// The validity window would overflow the timestamp range.
    #[error("Expiry for a code generated at {generated_at} is out of range")]
    ExpiryOutOfRange { generated_at: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CoreError::PayloadParse(err.to_string())
        } else {
            CoreError::PayloadSerialization(err.to_string())
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised only by the [`crate::validation`] boundary checks. Issuance itself
/// trusts its caller and never produces these.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., image reference that is neither URI nor path).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "address".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_json_syntax_error_is_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let core_err: CoreError = err.into();
        assert!(matches!(core_err, CoreError::PayloadParse(_)));
    }
}
