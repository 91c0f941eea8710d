//! # Expiry Ticker
//!
//! A background task that recomputes the countdown for one code.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ExpiryTicker                                    │
//! │                                                                         │
//! │   spawn(expires_at) ──► initial Countdown in the watch channel          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌───────────────────────────────────────────────┐                     │
//! │   │ loop {                                        │                     │
//! │   │   select! (biased) {                          │                     │
//! │   │     cancelled()    => break                   │◄── stop() / Drop    │
//! │   │     interval.tick() => Countdown::at(now)     │                     │
//! │   │   }                                           │                     │
//! │   │ }                                             │                     │
//! │   └───────────────────────────────────────────────┘                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   subscribers see "MM:SS" ... "00:00" (EXPIRED is sticky)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancellation is checked first on every wakeup and again just before a
//! reading is published. On a multi-thread runtime one tick that is already
//! publishing when `stop()` runs on another thread may still land; after
//! that the task exits and receivers see `changed()` fail. Readings that did
//! not change (an expired code stays at `00:00`) are not re-broadcast.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use kupon_core::{Clock, Countdown};

/// Countdown task for a single code.
///
/// Dropping the ticker cancels the task.
#[derive(Debug)]
pub struct ExpiryTicker {
    rx: watch::Receiver<Countdown>,
    cancel: CancellationToken,
}

impl ExpiryTicker {
    /// Spawns a ticker for a code expiring at `expires_at`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(expires_at: DateTime<Utc>, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (tx, rx) = watch::channel(Countdown::at(expires_at, clock.now()));
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await; // consume the immediate first tick

            loop {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let reading = Countdown::at(expires_at, clock.now());
                        tx.send_if_modified(|current| {
                            if task_cancel.is_cancelled() || *current == reading {
                                false
                            } else {
                                *current = reading;
                                true
                            }
                        });
                    }
                }
            }

            debug!(expires_at = %expires_at, "Expiry ticker stopped");
        });

        debug!(
            expires_at = %expires_at,
            period_ms = period.as_millis() as u64,
            "Expiry ticker started"
        );

        ExpiryTicker { rx, cancel }
    }

    /// The latest reading.
    pub fn current(&self) -> Countdown {
        self.rx.borrow().clone()
    }

    /// A receiver that is notified on every new reading.
    ///
    /// `changed()` returns an error once the ticker has stopped.
    pub fn subscribe(&self) -> watch::Receiver<Countdown> {
        self.rx.clone()
    }

    /// Stops the ticker. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// True once `stop()` has been called or the ticker was dropped.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ExpiryTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kupon_core::{ExpiryState, ManualClock};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap()
    }

    const SECOND: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn test_initial_reading() {
        let clock = ManualClock::new(start());
        let ticker = ExpiryTicker::spawn(
            start() + chrono::Duration::hours(48),
            Arc::new(clock),
            SECOND,
        );

        let reading = ticker.current();
        assert_eq!(reading.display, "2880:00");
        assert_eq!(reading.state, ExpiryState::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_down_each_second() {
        let clock = ManualClock::new(start());
        let ticker = ExpiryTicker::spawn(
            start() + chrono::Duration::seconds(3),
            Arc::new(clock.clone()),
            SECOND,
        );
        let mut rx = ticker.subscribe();
        assert_eq!(rx.borrow().display, "00:03");

        clock.advance(chrono::Duration::seconds(1));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().display, "00:02");

        clock.advance(chrono::Duration::seconds(1));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().display, "00:01");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_is_sticky() {
        let clock = ManualClock::new(start());
        let ticker = ExpiryTicker::spawn(
            start() + chrono::Duration::seconds(2),
            Arc::new(clock.clone()),
            SECOND,
        );
        let mut rx = ticker.subscribe();

        clock.advance(chrono::Duration::seconds(5));
        rx.changed().await.unwrap();
        let reading = rx.borrow_and_update().clone();
        assert_eq!(reading.display, "00:00");
        assert_eq!(reading.state, ExpiryState::Expired);

        // Further ticks produce the same reading and are not re-broadcast.
        tokio::time::sleep(SECOND * 5).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(ticker.current().state, ExpiryState::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_reading_after_stop() {
        let clock = ManualClock::new(start());
        let ticker = ExpiryTicker::spawn(
            start() + chrono::Duration::minutes(10),
            Arc::new(clock.clone()),
            SECOND,
        );
        let mut rx = ticker.subscribe();

        ticker.stop();
        assert!(ticker.is_stopped());

        clock.advance(chrono::Duration::minutes(1));
        tokio::time::sleep(SECOND * 3).await;

        assert_eq!(ticker.current().display, "10:00");
        // The task has exited and dropped its sender.
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let clock = ManualClock::new(start());
        let ticker = ExpiryTicker::spawn(
            start() + chrono::Duration::minutes(1),
            Arc::new(clock),
            SECOND,
        );
        let mut rx = ticker.subscribe();

        drop(ticker);
        assert!(rx.changed().await.is_err());
    }
}
