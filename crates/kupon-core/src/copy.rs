//! # Display Copy
//!
//! Fixed strings the display layer shows next to a code.

/// Notice under the QR code.
///
/// Says "10 menit" while the operative window is 48 hours
/// ([`crate::VALIDITY_WINDOW_HOURS`]). Kept as shipped; the kiosk config can
/// override it without touching the lifecycle.
pub const VALIDITY_NOTICE: &str =
    "Kode QR akan kedaluwarsa dalam 10 menit. Muat ulang untuk memperbarui.";

/// Header title on the result screen.
pub const REDEEMED_TITLE: &str = "Telah Ditukarkan";

/// Label next to the countdown digits.
pub const VALIDITY_LABEL: &str = "Masa berlaku";

/// Badge for an open outlet.
pub const OPEN_LABEL: &str = "Buka";

/// Badge for a closed outlet.
pub const CLOSED_LABEL: &str = "Tutup";

/// Open/closed badge text.
pub fn open_label(is_open: bool) -> &'static str {
    if is_open {
        OPEN_LABEL
    } else {
        CLOSED_LABEL
    }
}

/// "Redeemable at N outlets" heading.
pub fn outlets_heading(total_outlets: u32) -> String {
    format!("Bisa ditukar di {} gerai", total_outlets)
}
