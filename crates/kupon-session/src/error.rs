//! # Session Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Issuance      │  │     Display             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Core           │  │  NotOpen                │ │
//! │  │  ConfigLoad     │  │  Encoding       │  │  Clipboard              │ │
//! │  │  ConfigSave     │  │  TaskFailed     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kupon_core::CoreError;
use kupon_render::EncodingError;
use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session error type.
#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Issuance Errors
    // =========================================================================
    /// Issuance could not compute the record.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A code image could not be rendered.
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    TaskFailed(String),

    // =========================================================================
    // Display Errors
    // =========================================================================
    /// The session has no code on display.
    #[error("No code is on display")]
    NotOpen,

    /// Copying the code failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(err: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SessionError {
    fn from(err: toml::ser::Error) -> Self {
        SessionError::ConfigSaveFailed(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SessionError {
    fn from(err: tokio::task::JoinError) -> Self {
        SessionError::TaskFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SessionError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidConfig(_)
                | SessionError::ConfigLoadFailed(_)
                | SessionError::ConfigSaveFailed(_)
        )
    }

    /// Returns true for failures the operator recovers from in place.
    ///
    /// A failed copy leaves the displayed code untouched.
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionError::Clipboard(_))
    }
}
