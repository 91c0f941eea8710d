//! # Issue Command
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      kupon-kiosk issue                                  │
//! │                                                                         │
//! │  1. Validate item and outlet ──── VALIDATION_ERROR on failure          │
//! │  2. CouponSession::open ───────── QR + vertical barcode                │
//! │  3. Write qr-<id>.png, barcode-<id>.png into --out                     │
//! │  4. Print summary (or GeneratedCode as JSON)                           │
//! │  5. --copy: OSC 52, failure is a warning only                          │
//! │  6. --watch: live countdown until timeout or Ctrl-C                    │
//! │  7. Close the session (ticker cancelled)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use kupon_core::copy::{open_label, outlets_heading, REDEEMED_TITLE, VALIDITY_LABEL};
use kupon_core::validation::{validate_food_item, validate_outlet};
use kupon_core::{Countdown, DataUri, GeneratedCode};
use kupon_render::data_uri::decode_png_data_uri;
use kupon_session::{CouponSession, KuponConfig};

use crate::cli::IssueArgs;
use crate::clipboard::Osc52Clipboard;
use crate::error::{ApiError, ApiResult};

/// Paths of the images written for one code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFiles {
    pub qr: PathBuf,
    pub barcode: PathBuf,
}

/// Runs `kupon-kiosk issue`.
pub async fn handle(args: IssueArgs, config: &KuponConfig) -> ApiResult<()> {
    let item = args.food_item();
    let outlet = args.outlet();
    validate_food_item(&item)?;
    validate_outlet(&outlet)?;

    let session = CouponSession::from_config(config)?;
    let code = session
        .open(&item, &outlet)
        .await?
        .applied()
        .ok_or_else(|| ApiError::internal("Issued code was superseded"))?;
    let barcode = session
        .barcode()
        .ok_or_else(|| ApiError::internal("Barcode missing for displayed code"))?;

    let files = write_images(&args.out, &code, &barcode)?;

    if args.json {
        let body = serde_json::to_string_pretty(&code)
            .map_err(|e| ApiError::internal(e.to_string()))?;
        println!("{}", body);
    } else {
        print!("{}", summary(&code, &files, &config.display.validity_notice));
    }

    if args.copy {
        match session.copy_code(&Osc52Clipboard::stderr()) {
            Ok(()) => eprintln!("Kode produk disalin: {}", code.food_item.code),
            Err(e) => eprintln!("warning: {}", ApiError::from(e)),
        }
    }

    if let Some(secs) = args.watch {
        watch_countdown(&session, Duration::from_secs(secs), args.json).await;
    }

    session.close();
    Ok(())
}

/// Writes the QR and barcode PNGs for `code` into `dir`.
pub fn write_images(
    dir: &Path,
    code: &GeneratedCode,
    barcode: &DataUri,
) -> ApiResult<ImageFiles> {
    std::fs::create_dir_all(dir)?;

    let files = ImageFiles {
        qr: dir.join(format!("qr-{}.png", code.id)),
        barcode: dir.join(format!("barcode-{}.png", code.id)),
    };

    std::fs::write(&files.qr, decode_png_data_uri(&code.qr_code)?)?;
    std::fs::write(&files.barcode, decode_png_data_uri(barcode)?)?;

    info!(code_id = %code.id, qr = ?files.qr, barcode = ?files.barcode, "Wrote code images");
    Ok(files)
}

/// Human-readable summary of an issued code.
pub fn summary(code: &GeneratedCode, files: &ImageFiles, notice: &str) -> String {
    let item = &code.food_item;
    let outlet = &code.outlet_info;
    let countdown = Countdown::at(code.expires_at, code.generated_at);

    let lines = [
        REDEEMED_TITLE.to_string(),
        format!("  ID            {}", code.id),
        format!("  Produk        {} ({})", item.name, item.code),
        format!("  Harga         {}", item.price()),
        format!("  Outlet        {} [{}]", outlet.name, open_label(outlet.is_open)),
        format!("                {}", outlet.address),
        format!(
            "                {}, {}",
            outlets_heading(outlet.total_outlets),
            outlet.operating_hours
        ),
        format!(
            "  {:<13} {} (s.d. {})",
            VALIDITY_LABEL,
            countdown.display,
            code.expires_at.format("%Y-%m-%d %H:%M UTC")
        ),
        format!("  QR            {}", files.qr.display()),
        format!("  Barcode       {}", files.barcode.display()),
        notice.to_string(),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Prints countdown readings until `duration` passes, the code is closed
/// or the operator presses Ctrl-C.
async fn watch_countdown(session: &CouponSession, duration: Duration, json: bool) {
    let Some(mut rx) = session.subscribe_countdown() else {
        return;
    };

    let deadline = tokio::time::sleep(duration);
    tokio::pin!(deadline);

    // A failed handler install must not end the watch immediately.
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };
    tokio::pin!(ctrl_c);

    let first = rx.borrow_and_update().clone();
    print_reading(&first, json);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = &mut ctrl_c => {
                info!("Countdown interrupted");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let reading = rx.borrow_and_update().clone();
                print_reading(&reading, json);
            }
        }
    }
}

fn print_reading(reading: &Countdown, json: bool) {
    if json {
        match serde_json::to_string(reading) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!(error = %e, "Failed to serialize countdown"),
        }
    } else {
        println!("{} {}", VALIDITY_LABEL, reading.display);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
