//! # Money Module
//!
//! Provides the `Rupiah` type for showing item prices.
//!
//! ## Why Whole Rupiah?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RUPIAH HAS NO MINOR UNIT IN PRACTICE                                   │
//! │                                                                         │
//! │  Menu boards print Rp15.000, never Rp15.000,00                          │
//! │                                                                         │
//! │  OUR SOLUTION: u64 whole rupiah                                         │
//! │    • non-negative by construction (prices, not ledgers)                 │
//! │    • id-ID grouping: "." every three digits                             │
//! │    • the barcode encodes the raw integer, never the grouped text        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kupon_core::money::Rupiah;
//!
//! let price = Rupiah::new(15000);
//! assert_eq!(price.to_string(), "Rp15.000");
//! assert_eq!(price.grouped(), "15.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Currency symbol used on every price label.
pub const SYMBOL: &str = "Rp";

/// Thousands separator for the id-ID locale.
pub const THOUSANDS_SEPARATOR: char = '.';

// =============================================================================
// Rupiah Type
// =============================================================================

/// A price in whole rupiah.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Rupiah(#[ts(type = "number")] u64);

impl Rupiah {
    /// Creates an amount from whole rupiah.
    #[inline]
    pub const fn new(amount: u64) -> Self {
        Rupiah(amount)
    }

    /// Formats the amount with id-ID digit grouping and no symbol.
    ///
    /// ## Example
    /// ```rust
    /// use kupon_core::money::Rupiah;
    ///
    /// assert_eq!(Rupiah::new(0).grouped(), "0");
    /// assert_eq!(Rupiah::new(999).grouped(), "999");
    /// assert_eq!(Rupiah::new(1_250_000).grouped(), "1.250.000");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(THOUSANDS_SEPARATOR);
            }
            out.push(ch);
        }

        out
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SYMBOL, self.grouped())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
