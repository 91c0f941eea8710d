//! # Kupon Kiosk Library
//!
//! Command-line kiosk for issuing coupon redemption codes.
//!
//! ## Module Organization
//! ```text
//! kupon_kiosk/
//! ├── lib.rs          ◄─── You are here (logging, runtime, dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── clipboard.rs    ◄─── OSC 52 terminal clipboard
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── issue.rs    ◄─── issue: validate, render, write, count down
//! │   └── config.rs   ◄─── config: show / save effective settings
//! └── error.rs        ◄─── ApiError returned by every command
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Parse arguments ──────────────────────────────────────────────────► │
//! │  2. Initialize Logging (stderr, RUST_LOG or info,kupon=debug) ────────► │
//! │  3. Load kupon.toml (env > file > defaults) ──────────────────────────► │
//! │  4. Build tokio runtime ──────────────────────────────────────────────► │
//! │  5. Dispatch command; errors print as [CODE] message, exit status 1 ──► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kupon_session::KuponConfig;

use cli::{Cli, Command};
use error::{ApiError, ApiResult};

/// Runs the kiosk with process arguments.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();
    info!("Starting Kupon kiosk");

    let json = cli.wants_json();
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(code = ?err.code, "Command failed");
            report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration, builds the runtime and dispatches the command.
pub fn execute(cli: Cli) -> ApiResult<()> {
    let config = KuponConfig::load(cli.config.clone())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::internal(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(async {
        match cli.command {
            Command::Issue(args) => commands::issue::handle(args, &config).await,
            Command::Config(args) => commands::config::handle(args, &config, cli.config),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kupon_session=trace` - Trace the session crate only
/// - Default: INFO, DEBUG for kupon crates
///
/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kupon=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(err: &ApiError, json: bool) {
    if json {
        match serde_json::to_string(err) {
            Ok(body) => println!("{}", body),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        eprintln!("error: {}", err);
    }
}
