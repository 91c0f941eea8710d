//! # Expiry Tracker (pure part)
//!
//! Countdown arithmetic and formatting. The timer that drives it lives in
//! `kupon-session`; this module only answers "what does the countdown read
//! at instant `now`?".
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     ┌──────────┐   now ≥ expiresAt    ┌───────────┐                    │
//! │     │  ACTIVE  │ ───────────────────► │  EXPIRED  │ ──┐ every tick     │
//! │     │  "MM:SS" │                      │  "00:00"  │ ◄─┘ stays expired  │
//! │     └──────────┘                      └───────────┘                    │
//! │          ▲                                  │                           │
//! │          └──────── refresh() supplies a new expiresAt ─────────────────│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formatting
//! `minutes = floor(remaining / 60000)`, `seconds = floor((remaining mod
//! 60000) / 1000)`, both zero-padded to two digits. Minutes are not wrapped
//! into hours, so a fresh 48-hour code reads `2880:00` and counts down from
//! there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Countdown text once a code has expired.
pub const EXPIRED_DISPLAY: &str = "00:00";

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Whether a code can still be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ExpiryState {
    /// `now < expiresAt`.
    Active,
    /// `now ≥ expiresAt`.
    Expired,
}

/// One reading of the countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Countdown {
    /// Current state.
    pub state: ExpiryState,

    /// Milliseconds left, zero once expired.
    #[ts(type = "number")]
    pub remaining_ms: i64,

    /// `MM:SS` text for the header digits.
    pub display: String,
}

impl Countdown {
    /// Reads the countdown for a code expiring at `expires_at`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{Duration, TimeZone, Utc};
    /// use kupon_core::expiry::{Countdown, ExpiryState};
    ///
    /// let now = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
    /// let reading = Countdown::at(now + Duration::seconds(605), now);
    /// assert_eq!(reading.display, "10:05");
    /// assert_eq!(reading.state, ExpiryState::Active);
    ///
    /// let reading = Countdown::at(now, now);
    /// assert_eq!(reading.display, "00:00");
    /// assert_eq!(reading.state, ExpiryState::Expired);
    /// ```
    pub fn at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining_ms = (expires_at - now).num_milliseconds();

        if remaining_ms > 0 {
            Countdown {
                state: ExpiryState::Active,
                remaining_ms,
                display: format_remaining(remaining_ms),
            }
        } else {
            Countdown {
                state: ExpiryState::Expired,
                remaining_ms: 0,
                display: EXPIRED_DISPLAY.to_string(),
            }
        }
    }

    /// True while the code is redeemable.
    pub fn is_active(&self) -> bool {
        self.state == ExpiryState::Active
    }
}

/// Formats a positive remaining duration as `MM:SS`.
///
/// Non-positive input formats as [`EXPIRED_DISPLAY`].
pub fn format_remaining(remaining_ms: i64) -> String {
    if remaining_ms <= 0 {
        return EXPIRED_DISPLAY.to_string();
    }

    let minutes = remaining_ms / MS_PER_MINUTE;
    let seconds = (remaining_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{:02}:{:02}", minutes, seconds)
}
