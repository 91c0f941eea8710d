//! # Kupon Kiosk Entry Point
//!
//! The actual setup lives in lib.rs so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    kupon_kiosk::run()
}
