//! # Issuance
//!
//! Everything an issuance computes except the QR pixels.
//!
//! ## Issuance Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Issuance Flow                                   │
//! │                                                                         │
//! │  FoodItem + OutletInfo (trusted, pre-validated)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  canonicalize ──► forced outlet defaults, description, image            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QrPayload::new(item, outlet, now).encode()  ──► payload text           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  IssuanceDraft { id, item, outlet, payload, generatedAt, expiresAt }    │
//! │       │                                                                 │
//! │       │  (kupon-session renders payload → QR data URI off the executor) │
//! │       ▼                                                                 │
//! │  draft.into_generated(qr) ──► GeneratedCode                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};

use crate::canonical::{canonical_food_item, canonical_outlet};
use crate::error::{CoreError, CoreResult};
use crate::payload::{iso_timestamp, QrPayload};
use crate::types::{DataUri, FoodItem, GeneratedCode, OutletInfo};
use crate::VALIDITY_WINDOW_HOURS;

/// The fixed validity window.
pub fn validity_window() -> Duration {
    Duration::hours(VALIDITY_WINDOW_HOURS)
}

/// An issuance waiting for its QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceDraft {
    /// Coupon identifier.
    pub id: String,

    /// Canonical item.
    pub food_item: FoodItem,

    /// Canonical outlet.
    pub outlet_info: OutletInfo,

    /// Text to encode into the QR code.
    pub payload: String,

    /// Issuance instant (also the payload timestamp).
    pub generated_at: DateTime<Utc>,

    /// `generated_at` plus the validity window.
    pub expires_at: DateTime<Utc>,
}

impl IssuanceDraft {
    /// Attaches the rendered QR image and produces the final record.
    pub fn into_generated(self, qr_code: DataUri) -> GeneratedCode {
        GeneratedCode {
            id: self.id,
            food_item: self.food_item,
            outlet_info: self.outlet_info,
            qr_code,
            generated_at: self.generated_at,
            expires_at: self.expires_at,
        }
    }
}

/// Computes everything about an issuance at instant `now`.
///
/// ## Errors
/// - `CoreError::ExpiryOutOfRange` if `now` is within 48 hours of the end of
///   the representable time range
/// - `CoreError::PayloadSerialization` if the payload cannot be written
pub fn prepare_issuance(
    id: impl Into<String>,
    item: &FoodItem,
    outlet: &OutletInfo,
    now: DateTime<Utc>,
) -> CoreResult<IssuanceDraft> {
    let food_item = canonical_food_item(item);
    let outlet_info = canonical_outlet(outlet);

    let expires_at = now
        .checked_add_signed(validity_window())
        .ok_or_else(|| CoreError::ExpiryOutOfRange {
            generated_at: iso_timestamp(now),
        })?;

    let payload = QrPayload::new(&food_item, &outlet_info, now).encode()?;

    Ok(IssuanceDraft {
        id: id.into(),
        food_item,
        outlet_info,
        payload,
        generated_at: now,
        expires_at,
    })
}

/// Issuance instant for a refresh of a code generated at `previous`.
///
/// A refresh must be strictly later than the code it replaces. Clocks with
/// coarse resolution (or one stepped backwards) can report an instant that
/// is not, so the result is nudged one millisecond past `previous`.
pub fn refresh_instant(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
