//! # Kiosk Commands
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── issue.rs    ◄─── Issue a code, write images, count down
//! └── config.rs   ◄─── Show or save the effective configuration
//! ```
//!
//! Every command returns `ApiResult<T>`; lib.rs turns the error into an
//! exit status and a `[CODE] message` line.

pub mod config;
pub mod issue;
