//! # Domain Types
//!
//! Boundary records exchanged with the input and display layers.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    FoodItem     │   │   OutletInfo    │   │   GeneratedCode     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  code           │   │  name           │   │  id (9 chars)       │   │
//! │  │  name           │   │  address        │   │  foodItem           │   │
//! │  │  price          │   │  distance       │   │  outletInfo         │   │
//! │  │  description?   │   │  isOpen         │   │  qrCode (data URI)  │   │
//! │  │  image?         │   │  operatingHours │   │  generatedAt        │   │
//! │  └─────────────────┘   │  totalOutlets   │   │  expiresAt          │   │
//! │                        └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! All records serialize with camelCase field names so the display layer
//! reads `foodItem.price` and `outletInfo.isOpen` exactly as it always has.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Rupiah;

// =============================================================================
// Food Item
// =============================================================================

/// The food item a coupon is redeemable for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FoodItem {
    /// Product identifier printed under the codes.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Price in whole rupiah (no minor unit).
    #[ts(type = "number")]
    pub price: u64,

    /// Free-form description. Replaced on issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,

    /// Data URI or external reference for the item picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
}

impl FoodItem {
    /// Creates an item with no description and no image.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        FoodItem {
            code: code.into(),
            name: name.into(),
            price,
            description: None,
            image: None,
        }
    }

    /// Returns the price as a Rupiah amount.
    #[inline]
    pub fn price(&self) -> Rupiah {
        Rupiah::new(self.price)
    }

    /// Text encoded into the linear barcode: code immediately followed by price.
    ///
    /// ## Example
    /// ```rust
    /// use kupon_core::FoodItem;
    ///
    /// let item = FoodItem::new("ABC123", "Kopi Susu", 15000);
    /// assert_eq!(item.barcode_text(), "ABC12315000");
    /// ```
    pub fn barcode_text(&self) -> String {
        format!("{}{}", self.code, self.price)
    }
}

// =============================================================================
// Outlet Info
// =============================================================================

/// The outlet a coupon is redeemed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OutletInfo {
    /// Outlet name.
    pub name: String,

    /// Street address.
    pub address: String,

    /// Display distance, e.g. "1km".
    pub distance: String,

    /// Whether the outlet is currently open.
    pub is_open: bool,

    /// Free-form opening hours range, e.g. "00:00-23:59".
    pub operating_hours: String,

    /// Number of outlets accepting the coupon.
    pub total_outlets: u32,
}

impl OutletInfo {
    /// Creates an outlet with the issuance defaults for every display field.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        OutletInfo {
            name: name.into(),
            address: address.into(),
            distance: crate::DEFAULT_DISTANCE.to_string(),
            is_open: crate::DEFAULT_IS_OPEN,
            operating_hours: crate::DEFAULT_OPERATING_HOURS.to_string(),
            total_outlets: crate::DEFAULT_TOTAL_OUTLETS,
        }
    }
}

// =============================================================================
// Data URI
// =============================================================================

/// Inline, self-contained image data (`data:image/png;base64,...`).
///
/// The display layer renders it directly without any further fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct DataUri(String);

impl DataUri {
    /// Prefix of every PNG data URI we produce.
    pub const PNG_PREFIX: &'static str = "data:image/png;base64,";

    /// Wraps base64 PNG bytes in a data URI.
    pub fn from_png_base64(encoded: &str) -> Self {
        DataUri(format!("{}{}", Self::PNG_PREFIX, encoded))
    }

    /// Wraps an already formed URI string.
    pub fn from_string(uri: impl Into<String>) -> Self {
        DataUri(uri.into())
    }

    /// Returns the full URI.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base64 body of a PNG data URI.
    pub fn png_base64(&self) -> Option<&str> {
        self.0.strip_prefix(Self::PNG_PREFIX)
    }

    /// True when the URI carries no image data.
    pub fn is_empty(&self) -> bool {
        self.png_base64().map_or(true, str::is_empty)
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Generated Code
// =============================================================================

/// One issued redemption code.
///
/// ## Ownership
/// A `GeneratedCode` belongs to the session that requested it. A refresh
/// produces a brand-new value; nothing is ever mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeneratedCode {
    /// Nine uppercase alphanumerics, unique per issuance (best effort).
    pub id: String,

    /// Item with placeholder image and forced description applied.
    pub food_item: FoodItem,

    /// Outlet with the forced display defaults applied.
    pub outlet_info: OutletInfo,

    /// QR code image as a PNG data URI.
    pub qr_code: DataUri,

    /// When the code was issued.
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,

    /// When the code stops being redeemable.
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,
}

impl GeneratedCode {
    /// Length of the validity window.
    pub fn validity(&self) -> chrono::Duration {
        self.expires_at - self.generated_at
    }

    /// True once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_food_item_wire_format_is_camel_case() {
        let mut item = FoodItem::new("ABC123", "Kopi Susu", 15000);
        item.image = Some("data:image/png;base64,AAAA".to_string());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["code"], "ABC123");
        assert_eq!(json["price"], 15000);
        assert_eq!(json["image"], "data:image/png;base64,AAAA");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_food_item_accepts_missing_optionals() {
        let item: FoodItem =
            serde_json::from_str(r#"{"code":"A1","name":"Teh","price":5000}"#).unwrap();
        assert_eq!(item.description, None);
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_outlet_info_wire_format() {
        let outlet = OutletInfo::new("Outlet A", "Jl. Mawar 1");
        let json = serde_json::to_value(&outlet).unwrap();
        assert_eq!(json["isOpen"], true);
        assert_eq!(json["operatingHours"], "00:00-23:59");
        assert_eq!(json["totalOutlets"], 99);
    }

    #[test]
    fn test_barcode_text_has_no_separator() {
        let item = FoodItem::new("XYZ", "Roti", 0);
        assert_eq!(item.barcode_text(), "XYZ0");
    }

    #[test]
    fn test_data_uri_png_body() {
        let uri = DataUri::from_png_base64("iVBORw0KGgo=");
        assert_eq!(uri.as_str(), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(uri.png_base64(), Some("iVBORw0KGgo="));
        assert!(!uri.is_empty());

        assert!(DataUri::from_png_base64("").is_empty());
        assert!(DataUri::from_string("/unnamed.png").is_empty());
    }

    #[test]
    fn test_generated_code_expiry_boundary() {
        let generated_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let code = GeneratedCode {
            id: "ABCDEFGHI".to_string(),
            food_item: FoodItem::new("A", "B", 1),
            outlet_info: OutletInfo::new("O", "Addr"),
            qr_code: DataUri::from_png_base64("AAAA"),
            generated_at,
            expires_at: generated_at + chrono::Duration::hours(48),
        };

        assert_eq!(code.validity(), chrono::Duration::hours(48));
        assert!(!code.is_expired_at(code.expires_at - chrono::Duration::milliseconds(1)));
        assert!(code.is_expired_at(code.expires_at));

        let json = serde_json::to_value(&code).unwrap();
        assert!(json.get("foodItem").is_some());
        assert!(json.get("qrCode").is_some());
        assert!(json.get("expiresAt").is_some());
    }
}
