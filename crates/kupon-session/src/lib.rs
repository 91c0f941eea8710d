//! # kupon-session: Coupon Lifecycle for Kupon
//!
//! Issues and refreshes redemption codes, and keeps the one on screen
//! ticking down.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Display Session                                │
//! │                                                                         │
//! │   open(item, outlet)                    refresh()                       │
//! │        │                                    │                           │
//! │        ▼                                    ▼                           │
//! │   generation = N  ──────────────────  generation = N + 1               │
//! │        │                                    │                           │
//! │        ▼                                    ▼                           │
//! │   CouponIssuer::issue            CouponIssuer::refresh(current)        │
//! │   (QR rendered on the blocking pool)                                   │
//! │        │                                    │                           │
//! │        ▼                                    ▼                           │
//! │   LinearRenderer (code + price, vertical strip)                        │
//! │        │                                    │                           │
//! │        └──────────────┬─────────────────────┘                           │
//! │                       ▼                                                 │
//! │        apply only if generation > last applied                          │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │        stop old ExpiryTicker ──► start new ExpiryTicker(expiresAt)      │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │        watch::Receiver<Countdown>  "2879:59" ... "00:00"                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`issuer`] - `issue` / `refresh`
//! - [`ticker`] - Cancellable 1-second countdown task
//! - [`session`] - Last-write-wins holder of the displayed code
//! - [`clipboard`] - Clipboard seam and the transient "copied" flag
//! - [`config`] - `kupon.toml` loading
//! - [`error`] - `SessionError`

pub mod clipboard;
pub mod config;
pub mod error;
pub mod issuer;
pub mod session;
pub mod ticker;

pub use clipboard::{Clipboard, ClipboardError, CopyIndicator, MemoryClipboard};
pub use config::{CountdownSettings, DisplaySettings, KuponConfig};
pub use error::{SessionError, SessionResult};
pub use issuer::CouponIssuer;
pub use session::{CouponSession, RequestOutcome};
pub use ticker::ExpiryTicker;
