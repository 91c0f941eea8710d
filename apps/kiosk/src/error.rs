//! # API Error Type
//!
//! Unified error type for kiosk commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in the Kiosk                             │
//! │                                                                         │
//! │  ValidationError ─────────────┐                                        │
//! │  CoreError ───────────────────┤                                        │
//! │  EncodingError ───────────────┼──► ApiError { code, message }          │
//! │  SessionError ────────────────┤         │                              │
//! │  std::io::Error ──────────────┘         ▼                              │
//! │                              stderr: "error: [ENCODING_ERROR] ..."     │
//! │                              --json: {"code":"ENCODING_ERROR",...}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use kupon_core::{CoreError, ValidationError};
use kupon_render::EncodingError;
use kupon_session::SessionError;

/// Result type for kiosk commands.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned from kiosk commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "outlet name is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed boundary validation
    ValidationError,

    /// A code image could not be produced
    EncodingError,

    /// Bad or unreadable configuration
    ConfigError,

    /// Copy to clipboard failed
    ClipboardError,

    /// Writing output files failed
    IoError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::ExpiryOutOfRange { .. } => ApiError::internal(err.to_string()),
            CoreError::PayloadSerialization(e) | CoreError::PayloadParse(e) => {
                tracing::error!("Payload error: {}", e);
                ApiError::new(ErrorCode::EncodingError, "Could not build the QR payload")
            }
        }
    }
}

impl From<EncodingError> for ApiError {
    fn from(err: EncodingError) -> Self {
        ApiError::new(ErrorCode::EncodingError, err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Core(e) => e.into(),
            SessionError::Encoding(e) => e.into(),
            SessionError::Clipboard(e) => ApiError::new(ErrorCode::ClipboardError, e.to_string()),
            SessionError::InvalidConfig(_)
            | SessionError::ConfigLoadFailed(_)
            | SessionError::ConfigSaveFailed(_) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            SessionError::NotOpen => ApiError::internal(err.to_string()),
            SessionError::TaskFailed(e) => {
                tracing::error!("Render task failed: {}", e);
                ApiError::internal("Rendering was interrupted")
            }
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("Field 'code' is required");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"VALIDATION_ERROR","message":"Field 'code' is required"}"#
        );
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] Field 'code' is required");
    }

    #[test]
    fn test_session_error_mapping() {
        let err: ApiError =
            SessionError::Encoding(EncodingError::PayloadTooLong { len: 9000 }).into();
        assert_eq!(err.code, ErrorCode::EncodingError);

        let err: ApiError = SessionError::InvalidConfig("qr.size".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);

        let err: ApiError = SessionError::Core(CoreError::Validation(ValidationError::Required {
            field: "name".into(),
        }))
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
