//! # Coupon Session
//!
//! Holds the code currently on display together with its vertical barcode
//! and countdown ticker.
//!
//! ## Last Write Wins
//! ```text
//!   t ──────────────────────────────────────────────────────────────────►
//!
//!   refresh #1 (gen 1) ├──────────── rendering ────────────┤ discarded
//!   refresh #2 (gen 2)       ├──── rendering ────┤ applied
//!
//!   applied generation:  0 ─────────────────────── 2 ──────── 2
//! ```
//!
//! Every `open`/`refresh` takes the next generation number before it
//! starts. A finished request is applied only if its generation is newer
//! than the one on display; otherwise it is reported as superseded and
//! dropped. `close` retires every generation handed out so far, so a
//! request still rendering when the display is torn down never comes back
//! on screen or starts a ticker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use kupon_core::{Countdown, DataUri, FoodItem, GeneratedCode, OutletInfo};
use kupon_render::{CodeRenderer, LinearRenderer};

use crate::clipboard::{Clipboard, CopyIndicator};
use crate::config::KuponConfig;
use crate::error::{SessionError, SessionResult};
use crate::issuer::CouponIssuer;
use crate::ticker::ExpiryTicker;

/// What happened to an `open` or `refresh` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The new code is now on display.
    Applied(GeneratedCode),

    /// A newer request finished first; this result was dropped.
    Superseded { generation: u64 },
}

impl RequestOutcome {
    /// The displayed code, if this request won.
    pub fn applied(self) -> Option<GeneratedCode> {
        match self {
            RequestOutcome::Applied(code) => Some(code),
            RequestOutcome::Superseded { .. } => None,
        }
    }
}

/// Everything shown for one code.
#[derive(Debug)]
struct Displayed {
    code: GeneratedCode,
    barcode: DataUri,
    ticker: ExpiryTicker,
}

#[derive(Debug, Default)]
struct State {
    applied: u64,
    displayed: Option<Displayed>,
}

/// The display session.
///
/// Methods take `&self`; wrap the session in an `Arc` to let several
/// requests race.
#[derive(Debug)]
pub struct CouponSession {
    issuer: CouponIssuer,
    barcode: Arc<LinearRenderer>,
    tick_period: Duration,
    requested: AtomicU64,
    state: Mutex<State>,
    copied: CopyIndicator,
}

impl CouponSession {
    /// Creates an empty session.
    pub fn new(issuer: CouponIssuer, barcode: LinearRenderer, tick_period: Duration) -> Self {
        CouponSession {
            issuer,
            barcode: Arc::new(barcode),
            tick_period,
            requested: AtomicU64::new(0),
            state: Mutex::new(State::default()),
            copied: CopyIndicator::default(),
        }
    }

    /// Creates a session with renderers and tick period from `config`.
    pub fn from_config(config: &KuponConfig) -> SessionResult<Self> {
        let issuer = CouponIssuer::new(config.qr_renderer()?);
        Ok(Self::new(
            issuer,
            config.barcode_renderer()?,
            config.countdown.tick_interval(),
        ))
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Issues a code for `item` at `outlet` and puts it on display.
    pub async fn open(
        &self,
        item: &FoodItem,
        outlet: &OutletInfo,
    ) -> SessionResult<RequestOutcome> {
        let generation = self.next_generation();
        debug!(generation, item = %item.code, "Opening code");

        let code = self.issuer.issue(item, outlet).await?;
        self.finish(generation, code).await
    }

    /// Replaces the displayed code with a freshly issued one.
    ///
    /// ## Errors
    /// - `SessionError::NotOpen` if nothing is on display
    /// - issuance and encoding errors, unchanged
    pub async fn refresh(&self) -> SessionResult<RequestOutcome> {
        let current = self.current().ok_or(SessionError::NotOpen)?;
        let generation = self.next_generation();
        debug!(generation, previous_id = %current.id, "Refreshing code");

        let code = self.issuer.refresh(&current).await?;
        self.finish(generation, code).await
    }

    /// Takes the code off display and stops its ticker.
    ///
    /// Requests still in flight resolve to `Superseded`.
    pub fn close(&self) {
        let displayed = {
            let mut state = self.lock();
            state.applied = state.applied.max(self.requested.load(Ordering::SeqCst));
            state.displayed.take()
        };
        if let Some(displayed) = displayed {
            displayed.ticker.stop();
            info!(code_id = %displayed.code.id, "Closed code display");
        }
        self.copied.clear();
    }

    // =========================================================================
    // Display Accessors
    // =========================================================================

    /// The code on display.
    pub fn current(&self) -> Option<GeneratedCode> {
        self.lock().displayed.as_ref().map(|d| d.code.clone())
    }

    /// The vertical barcode of the code on display.
    pub fn barcode(&self) -> Option<DataUri> {
        self.lock().displayed.as_ref().map(|d| d.barcode.clone())
    }

    /// The latest countdown reading.
    pub fn countdown(&self) -> Option<Countdown> {
        self.lock().displayed.as_ref().map(|d| d.ticker.current())
    }

    /// Countdown updates for the code on display.
    ///
    /// The receiver closes when that code is replaced or closed.
    pub fn subscribe_countdown(&self) -> Option<watch::Receiver<Countdown>> {
        self.lock().displayed.as_ref().map(|d| d.ticker.subscribe())
    }

    /// Newest generation that can no longer be applied: the code on display,
    /// or the last request retired by `close` (0 before either).
    pub fn applied_generation(&self) -> u64 {
        self.lock().applied
    }

    // =========================================================================
    // Copy Code
    // =========================================================================

    /// Copies the displayed product code to `clipboard`.
    ///
    /// On success the "copied" indicator lights for two seconds. A failed
    /// copy is logged and returned; the display is unaffected.
    pub fn copy_code(&self, clipboard: &dyn Clipboard) -> SessionResult<()> {
        let code = self
            .lock()
            .displayed
            .as_ref()
            .map(|d| d.code.food_item.code.clone())
            .ok_or(SessionError::NotOpen)?;

        match clipboard.set_text(&code) {
            Ok(()) => {
                self.copied.mark();
                debug!(code = %code, "Copied product code");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to copy product code");
                Err(e.into())
            }
        }
    }

    /// True for two seconds after a successful copy.
    pub fn is_copied(&self) -> bool {
        self.copied.is_lit()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn next_generation(&self) -> u64 {
        self.requested.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn finish(
        &self,
        generation: u64,
        code: GeneratedCode,
    ) -> SessionResult<RequestOutcome> {
        let renderer = Arc::clone(&self.barcode);
        let text = code.food_item.barcode_text();
        let barcode =
            tokio::task::spawn_blocking(move || renderer.render_data_uri(&text)).await??;

        Ok(self.apply(generation, code, barcode))
    }

    fn apply(&self, generation: u64, code: GeneratedCode, barcode: DataUri) -> RequestOutcome {
        let mut state = self.lock();

        if generation <= state.applied {
            debug!(
                generation,
                applied = state.applied,
                code_id = %code.id,
                "Discarding superseded code"
            );
            return RequestOutcome::Superseded { generation };
        }

        if let Some(previous) = state.displayed.take() {
            previous.ticker.stop();
        }

        let ticker = ExpiryTicker::spawn(code.expires_at, self.issuer.clock(), self.tick_period);
        state.applied = generation;
        state.displayed = Some(Displayed {
            code: code.clone(),
            barcode,
            ticker,
        });

        info!(generation, code_id = %code.id, "Code on display");
        RequestOutcome::Applied(code)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::VecDeque;
    use kupon_core::{ExpiryState, ManualClock, SequentialIdGenerator};
    use kupon_render::data_uri::decode_png_image;
    use kupon_render::{BarcodeOptions, QrOptions, QrRenderer};

    use crate::clipboard::{ClipboardError, MemoryClipboard};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap()
    }

    fn session(clock: &ManualClock) -> CouponSession {
        let issuer = CouponIssuer::with_parts(
            Arc::new(SequentialIdGenerator::default()),
            Arc::new(clock.clone()),
            Arc::new(QrRenderer::new(QrOptions::default()).unwrap()),
        );
        CouponSession::new(
            issuer,
            LinearRenderer::new(BarcodeOptions::default()).unwrap(),
            Duration::from_secs(1),
        )
    }

    fn item() -> FoodItem {
        FoodItem::new("ABC123", "Kopi Susu", 15000)
    }

    fn outlet() -> OutletInfo {
        OutletInfo::new("Outlet A", "Jl. Mawar 1")
    }

    /// QR renderer that sleeps before each render, one delay (ms) per call.
    struct SlowQr {
        inner: QrRenderer,
        delays: Mutex<VecDeque<u64>>,
    }

    impl CodeRenderer for SlowQr {
        fn render_data_uri(&self, text: &str) -> kupon_render::RenderResult<DataUri> {
            let delay = self.delays.lock().unwrap().pop_front().unwrap_or(0);
            std::thread::sleep(Duration::from_millis(delay));
            self.inner.render_data_uri(text)
        }
    }

    fn slow_session(clock: &ManualClock, delays: &[u64]) -> CouponSession {
        let qr = SlowQr {
            inner: QrRenderer::new(QrOptions::default()).unwrap(),
            delays: Mutex::new(delays.iter().copied().collect()),
        };
        let issuer = CouponIssuer::with_parts(
            Arc::new(SequentialIdGenerator::default()),
            Arc::new(clock.clone()),
            Arc::new(qr),
        );
        CouponSession::new(
            issuer,
            LinearRenderer::new(BarcodeOptions::default()).unwrap(),
            Duration::from_secs(1),
        )
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no terminal".into()))
        }
    }

    #[tokio::test]
    async fn test_open_displays_code_and_barcode() {
        let clock = ManualClock::new(start());
        let session = session(&clock);

        let code = session.open(&item(), &outlet()).await.unwrap().applied().unwrap();

        assert_eq!(session.current(), Some(code));
        assert_eq!(session.applied_generation(), 1);

        let barcode = decode_png_image(&session.barcode().unwrap()).unwrap();
        assert_eq!((barcode.width(), barcode.height()), (148, 128));

        let countdown = session.countdown().unwrap();
        assert_eq!(countdown.display, "2880:00");
        assert_eq!(countdown.state, ExpiryState::Active);
    }

    #[tokio::test]
    async fn test_refresh_requires_open_session() {
        let clock = ManualClock::new(start());
        let session = session(&clock);
        assert!(matches!(session.refresh().await, Err(SessionError::NotOpen)));
    }

    #[tokio::test]
    async fn test_refresh_replaces_code_and_ticker() {
        let clock = ManualClock::new(start());
        let session = session(&clock);
        let first = session.open(&item(), &outlet()).await.unwrap().applied().unwrap();
        let mut old_countdown = session.subscribe_countdown().unwrap();

        clock.advance(chrono::Duration::hours(49));
        let second = session.refresh().await.unwrap().applied().unwrap();

        assert_ne!(second.id, first.id);
        assert!(second.generated_at > first.generated_at);
        assert_eq!(session.current(), Some(second));
        assert_eq!(session.countdown().unwrap().state, ExpiryState::Active);

        // The first code's ticker is gone: its channel closes.
        while old_countdown.changed().await.is_ok() {}
    }

    #[tokio::test]
    async fn test_newer_refresh_wins_race() {
        let clock = ManualClock::new(start());
        let session = Arc::new(slow_session(&clock, &[0, 300, 0]));
        session.open(&item(), &outlet()).await.unwrap();

        // The older refresh is still rendering when the newer one lands.
        let slow = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = session.refresh().await.unwrap().applied().unwrap();

        assert_eq!(
            slow.await.unwrap().unwrap(),
            RequestOutcome::Superseded { generation: 2 }
        );
        assert_eq!(session.current(), Some(fast));
        assert_eq!(session.applied_generation(), 3);
    }

    #[tokio::test]
    async fn test_close_during_refresh_discards_result() {
        let clock = ManualClock::new(start());
        let session = Arc::new(slow_session(&clock, &[0, 300]));
        session.open(&item(), &outlet()).await.unwrap();

        let pending = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.close();

        assert_eq!(
            pending.await.unwrap().unwrap(),
            RequestOutcome::Superseded { generation: 2 }
        );
        assert!(session.current().is_none());
        assert!(session.subscribe_countdown().is_none());

        // A request started after the close is displayed normally.
        let reopened = session.open(&item(), &outlet()).await.unwrap();
        assert!(matches!(reopened, RequestOutcome::Applied(_)));
        assert_eq!(session.applied_generation(), 3);
    }

    #[tokio::test]
    async fn test_close_during_open_discards_result() {
        let clock = ManualClock::new(start());
        let session = Arc::new(slow_session(&clock, &[300]));

        let pending = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.open(&item(), &outlet()).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.close();

        assert_eq!(
            pending.await.unwrap().unwrap(),
            RequestOutcome::Superseded { generation: 1 }
        );
        assert!(session.current().is_none());
        assert!(session.countdown().is_none());
    }

    #[tokio::test]
    async fn test_close_stops_ticker() {
        let clock = ManualClock::new(start());
        let session = session(&clock);
        session.open(&item(), &outlet()).await.unwrap();
        let mut countdown = session.subscribe_countdown().unwrap();

        session.close();

        assert!(session.current().is_none());
        assert!(session.countdown().is_none());
        while countdown.changed().await.is_ok() {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_code_sets_transient_flag() {
        let clock = ManualClock::new(start());
        let session = session(&clock);
        session.open(&item(), &outlet()).await.unwrap();

        let clipboard = MemoryClipboard::new();
        session.copy_code(&clipboard).unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("ABC123"));
        assert!(session.is_copied());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!session.is_copied());
    }

    #[tokio::test]
    async fn test_copy_failure_is_recoverable() {
        let clock = ManualClock::new(start());
        let session = session(&clock);

        assert!(matches!(
            session.copy_code(&MemoryClipboard::new()),
            Err(SessionError::NotOpen)
        ));

        session.open(&item(), &outlet()).await.unwrap();
        let err = session.copy_code(&BrokenClipboard).unwrap_err();

        assert!(err.is_transient());
        assert!(!session.is_copied());
        assert!(session.current().is_some());
    }
}
