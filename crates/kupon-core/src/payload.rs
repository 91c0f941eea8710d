//! # Payload Encoder
//!
//! The text a scanner reads out of the QR code.
//!
//! ## Payload Shape
//! ```text
//! {"code":"ABC123","name":"Kopi Susu","price":15000,"outlet":"Outlet A","timestamp":"2026-01-01T08:00:00.000Z"}
//! ```
//!
//! Compact JSON, fields in this fixed order. `address`, `description` and
//! `image` are left out on purpose: every extra byte pushes the QR code to
//! a denser version that is harder to scan off a phone screen.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{FoodItem, OutletInfo};

/// Structured form of the QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// Product identifier.
    pub code: String,

    /// Product name.
    pub name: String,

    /// Price in whole rupiah.
    pub price: u64,

    /// Outlet name.
    pub outlet: String,

    /// Issuance instant, ISO-8601 with milliseconds and a `Z` suffix.
    pub timestamp: String,
}

impl QrPayload {
    /// Builds the payload for an item redeemed at `outlet`, stamped `at`.
    pub fn new(item: &FoodItem, outlet: &OutletInfo, at: DateTime<Utc>) -> Self {
        QrPayload {
            code: item.code.clone(),
            name: item.name.clone(),
            price: item.price,
            outlet: outlet.name.clone(),
            timestamp: iso_timestamp(at),
        }
    }

    /// Serializes to compact JSON text.
    ///
    /// Deterministic: the same payload always yields the same bytes.
    pub fn encode(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses payload text read back from a scan.
    pub fn decode(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Formats an instant the way scanners at the counter expect it.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use kupon_core::payload::iso_timestamp;
///
/// let at = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
/// assert_eq!(iso_timestamp(at), "2026-01-01T08:00:00.000Z");
/// ```
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
