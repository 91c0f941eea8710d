//! # Coupon Issuer
//!
//! Produces `GeneratedCode` records.
//!
//! ## Issuance Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         issue(item, outlet)                             │
//! │                                                                         │
//! │  1. id        ◄── IdGenerator::next_id()          (9 × [0-9A-Z])        │
//! │  2. now       ◄── Clock::now()                                          │
//! │  3. draft     ◄── prepare_issuance()                                    │
//! │                   canonical item + outlet, expiresAt = now + 48h,       │
//! │                   compact JSON payload                                  │
//! │  4. qrCode    ◄── spawn_blocking(QR render)        (CPU bound)          │
//! │  5. record    ◄── draft + qrCode                                        │
//! │                                                                         │
//! │  refresh(current) = issue(current.foodItem, current.outletInfo)        │
//! │                     with generatedAt forced past current.generatedAt   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inputs are trusted: validation happens at the form boundary. Failures
//! propagate as-is and are never retried here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use kupon_core::issuance::{prepare_issuance, refresh_instant};
use kupon_core::{
    Clock, FoodItem, GeneratedCode, IdGenerator, OutletInfo, RandomIdGenerator, SystemClock,
};
use kupon_render::CodeRenderer;

use crate::error::SessionResult;

/// Issues and refreshes redemption codes.
///
/// Cheap to clone; clones share the id source, clock and renderer.
#[derive(Clone)]
pub struct CouponIssuer {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    qr: Arc<dyn CodeRenderer>,
}

impl std::fmt::Debug for CouponIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouponIssuer").finish_non_exhaustive()
    }
}

impl CouponIssuer {
    /// Creates an issuer with random identifiers and the wall clock.
    pub fn new(qr: impl CodeRenderer + 'static) -> Self {
        Self::with_parts(Arc::new(RandomIdGenerator), Arc::new(SystemClock), Arc::new(qr))
    }

    /// Creates an issuer from explicit parts.
    pub fn with_parts(
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        qr: Arc<dyn CodeRenderer>,
    ) -> Self {
        CouponIssuer { ids, clock, qr }
    }

    /// The clock issuance reads.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Issues a new code for `item` at `outlet`.
    ///
    /// ## Errors
    /// - `SessionError::Encoding` if the payload does not fit in a QR code
    /// - `SessionError::Core` if the expiry instant is unrepresentable
    pub async fn issue(
        &self,
        item: &FoodItem,
        outlet: &OutletInfo,
    ) -> SessionResult<GeneratedCode> {
        let now = self.clock.now();
        let code = self.issue_at(item, outlet, now).await?;

        info!(
            code_id = %code.id,
            item = %code.food_item.code,
            outlet = %code.outlet_info.name,
            expires_at = %code.expires_at,
            "Issued redemption code"
        );
        Ok(code)
    }

    /// Issues a replacement for `current`.
    ///
    /// `current` is left untouched. The replacement always has a strictly
    /// later `generated_at`.
    pub async fn refresh(&self, current: &GeneratedCode) -> SessionResult<GeneratedCode> {
        let now = refresh_instant(current.generated_at, self.clock.now());
        let code = self
            .issue_at(&current.food_item, &current.outlet_info, now)
            .await?;

        info!(
            previous_id = %current.id,
            code_id = %code.id,
            expires_at = %code.expires_at,
            "Refreshed redemption code"
        );
        Ok(code)
    }

    async fn issue_at(
        &self,
        item: &FoodItem,
        outlet: &OutletInfo,
        now: DateTime<Utc>,
    ) -> SessionResult<GeneratedCode> {
        let draft = prepare_issuance(self.ids.next_id(), item, outlet, now)?;
        debug!(code_id = %draft.id, bytes = draft.payload.len(), "Rendering QR payload");

        let renderer = Arc::clone(&self.qr);
        let payload = draft.payload.clone();
        let qr_code =
            tokio::task::spawn_blocking(move || renderer.render_data_uri(&payload)).await??;

        Ok(draft.into_generated(qr_code))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
