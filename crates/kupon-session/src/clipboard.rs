//! # Clipboard
//!
//! The operator can copy the product code from the display. Where the text
//! goes is platform business, so the session only sees the [`Clipboard`]
//! trait.
//!
//! A successful copy lights the "copied" indicator for two seconds. The
//! indicator stores a deadline instead of running a timer, so there is
//! nothing to cancel.

use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// How long the "copied" indicator stays lit.
pub const COPIED_FLAG_DURATION: Duration = Duration::from_secs(2);

/// Failure to place text on the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard reachable from here.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard refused the write.
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Somewhere to put copied text.
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns what was last copied.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

// =============================================================================
// Copy Indicator
// =============================================================================

/// The transient "copied" flag.
#[derive(Debug)]
pub struct CopyIndicator {
    lit_for: Duration,
    until: Mutex<Option<Instant>>,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new(COPIED_FLAG_DURATION)
    }
}

impl CopyIndicator {
    /// Creates an indicator that stays lit for `lit_for` after each copy.
    pub fn new(lit_for: Duration) -> Self {
        CopyIndicator {
            lit_for,
            until: Mutex::new(None),
        }
    }

    /// Lights the indicator, restarting its window.
    pub fn mark(&self) {
        let mut until = self.until.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *until = Some(Instant::now() + self.lit_for);
    }

    /// True while inside the window of the most recent copy.
    pub fn is_lit(&self) -> bool {
        let until = self.until.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        until.map_or(false, |deadline| Instant::now() < deadline)
    }

    /// Turns the indicator off.
    pub fn clear(&self) {
        *self.until.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}
