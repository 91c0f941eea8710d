//! # kupon-core: Pure Coupon Logic for Kupon
//!
//! This crate is the **heart** of Kupon. It decides what a redemption code
//! contains, when it expires and how its countdown reads, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kupon Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Display Layer (kiosk / web)                  │   │
//! │  │    Input Form ──► QR + Vertical Barcode ──► Countdown "MM:SS"   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               kupon-session (issue / refresh / ticker)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kupon-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │  │  types   │ │ payload  │ │  expiry  │ │identifier│ │canonic.│ │   │
//! │  │  │ FoodItem │ │ QrPayload│ │Countdown │ │ 9 chars  │ │defaults│ │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RENDERING • NO TIMERS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Boundary records (FoodItem, OutletInfo, GeneratedCode)
//! - [`canonical`] - Forced defaults applied on every issuance
//! - [`identifier`] - Short coupon identifiers
//! - [`payload`] - The JSON text embedded in the QR code
//! - [`issuance`] - Everything about an issuance except the QR pixels
//! - [`expiry`] - Countdown state machine and `MM:SS` formatting
//! - [`clock`] - Injectable time source
//! - [`money`] - Rupiah display formatting
//! - [`validation`] - Input boundary checks
//! - [`copy`] - Display copy strings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use kupon_core::{prepare_issuance, FoodItem, OutletInfo};
//!
//! let item = FoodItem::new("ABC123", "Kopi Susu", 15000);
//! let outlet = OutletInfo::new("Outlet A", "Jl. Mawar 1");
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
//!
//! let draft = prepare_issuance("K7Q2M9X4A", &item, &outlet, now).unwrap();
//!
//! assert_eq!(draft.outlet_info.total_outlets, 99);
//! assert_eq!(draft.expires_at - draft.generated_at, chrono::Duration::hours(48));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod canonical;
pub mod clock;
pub mod copy;
pub mod error;
pub mod expiry;
pub mod identifier;
pub mod issuance;
pub mod money;
pub mod payload;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kupon_core::FoodItem` instead of
// `use kupon_core::types::FoodItem`

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use expiry::{Countdown, ExpiryState};
pub use identifier::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use issuance::{prepare_issuance, IssuanceDraft};
pub use money::Rupiah;
pub use payload::QrPayload;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How long an issued code stays redeemable.
///
/// ## Display copy
/// This is the operative lifecycle value. The display copy still says
/// "10 minutes" (see [`copy::VALIDITY_NOTICE`]); that string is corrected
/// separately and never feeds the computation.
pub const VALIDITY_WINDOW_HOURS: i64 = 48;

/// Length of every coupon identifier.
pub const ID_LENGTH: usize = 9;

/// Description written onto every issued food item.
pub const FORCED_DESCRIPTION: &str = "Tersedia selama jam buka";

/// Image reference used when the caller supplied none.
pub const PLACEHOLDER_IMAGE: &str = "/unnamed.png";

/// Outlet distance shown for every issued code.
pub const DEFAULT_DISTANCE: &str = "1km";

/// Outlet open flag for every issued code.
pub const DEFAULT_IS_OPEN: bool = true;

/// Outlet operating hours for every issued code.
pub const DEFAULT_OPERATING_HOURS: &str = "00:00-23:59";

/// Number of outlets the code can be redeemed at.
pub const DEFAULT_TOTAL_OUTLETS: u32 = 99;
