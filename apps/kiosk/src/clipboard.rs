//! # Terminal Clipboard
//!
//! Copies text through the OSC 52 escape sequence, which most terminal
//! emulators (and tmux with `set-clipboard on`) forward to the system
//! clipboard, including over SSH.
//!
//! ```text
//!   ESC ] 52 ; c ; <base64 text> BEL
//! ```

use std::io::{IsTerminal, Write};
use std::sync::Mutex;

use base64::{engine::general_purpose, Engine as _};

use kupon_session::{Clipboard, ClipboardError};

/// Formats the OSC 52 sequence that sets the clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", general_purpose::STANDARD.encode(text))
}

/// Clipboard that writes OSC 52 sequences to a terminal.
pub struct Osc52Clipboard<W: Write + Send> {
    out: Mutex<W>,
    is_terminal: bool,
}

impl Osc52Clipboard<std::io::Stderr> {
    /// Writes to stderr, which stays attached to the terminal when stdout
    /// is piped.
    pub fn stderr() -> Self {
        let err = std::io::stderr();
        let is_terminal = err.is_terminal();
        Osc52Clipboard {
            out: Mutex::new(err),
            is_terminal,
        }
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    /// Writes to an arbitrary sink, treated as a terminal.
    pub fn with_writer(out: W) -> Self {
        Osc52Clipboard {
            out: Mutex::new(out),
            is_terminal: true,
        }
    }

    /// Returns the sink.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.is_terminal {
            return Err(ClipboardError::Unavailable(
                "stderr is not a terminal".to_string(),
            ));
        }

        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_format() {
        assert_eq!(osc52_sequence("ABC123"), "\x1b]52;c;QUJDMTIz\x07");
    }

    #[test]
    fn test_writes_sequence() {
        let clipboard = Osc52Clipboard::with_writer(Vec::new());
        clipboard.set_text("ABC123").unwrap();
        assert_eq!(clipboard.into_inner(), osc52_sequence("ABC123").into_bytes());
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let clipboard = Osc52Clipboard::with_writer(Closed);
        assert!(matches!(
            clipboard.set_text("ABC123"),
            Err(ClipboardError::WriteFailed(_))
        ));
    }
}
