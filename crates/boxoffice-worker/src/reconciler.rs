//! Safety-net reconciler.
//!
//! The keyspace-notification pipeline can lose expirations (store restart,
//! consumer downtime, partitions). On a fixed delay, the reconciler finds
//! holds that are `ACTIVE` in the record store but past their expiry,
//! verifies their lock keys are really gone, and completes the cleanup.
//! While any lock key still matches the hold, the TTL is authoritative and
//! the hold is left for the notification path.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info, warn};

use boxoffice_cache::lock::SeatLockStore;
use boxoffice_cache::overlay::SeatOverlayStore;
use boxoffice_core::config::ReconcilerConfig;
use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::events::SeatHoldAuditEvent;
use boxoffice_core::result::AppResult;
use boxoffice_database::SideEffects;
use boxoffice_database::repositories::{SeatHoldRepository, SeatRepository};
use boxoffice_entity::hold::{HoldStatus, SeatHold};
use boxoffice_entity::seat::SeatStatus;
use boxoffice_messaging::EventPublisher;
use boxoffice_service::RequestContext;

/// The safety-net reconciler task.
#[derive(Clone)]
pub struct HoldReconciler {
    pool: PgPool,
    seat_repo: SeatRepository,
    hold_repo: SeatHoldRepository,
    locks: Arc<dyn SeatLockStore>,
    overlay: Arc<dyn SeatOverlayStore>,
    publisher: Arc<EventPublisher>,
    config: ReconcilerConfig,
}

impl std::fmt::Debug for HoldReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldReconciler").finish()
    }
}

impl HoldReconciler {
    /// Create a new reconciler.
    pub fn new(
        pool: PgPool,
        seat_repo: SeatRepository,
        hold_repo: SeatHoldRepository,
        locks: Arc<dyn SeatLockStore>,
        overlay: Arc<dyn SeatOverlayStore>,
        publisher: Arc<EventPublisher>,
        config: ReconcilerConfig,
    ) -> Self {
        Self {
            pool,
            seat_repo,
            hold_repo,
            locks,
            overlay,
            publisher,
            config,
        }
    }

    /// Run one startup-recovery pass, then tick on a fixed delay until the
    /// cancel signal fires.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        if !self.config.enabled {
            info!("Reconciler disabled by configuration");
            return;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);
        info!(interval_seconds = self.config.interval_seconds, "Reconciler started");

        // Startup recovery: the store may have wiped its keys while we
        // were down, leaving ACTIVE holds with no TTL to fire.
        match self.tick().await {
            Ok(cleaned) if cleaned > 0 => {
                info!(cleaned, "Startup recovery reconciled expired holds");
            }
            Ok(_) => info!("Startup recovery: hold state is consistent"),
            Err(e) => error!(error = %e, "Startup recovery failed"),
        }

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        break;
                    }
                }
                _ = time::sleep(interval) => {
                    if let Err(e) = self.tick().await {
                        error!(error = %e, "Reconciler tick failed");
                    }
                }
            }
        }

        info!("Reconciler stopped");
    }

    /// One reconciliation pass. Returns the number of holds cleaned.
    pub async fn tick(&self) -> AppResult<usize> {
        let ctx = RequestContext::background("reconciler");
        let now = Utc::now();

        let expired = self.hold_repo.find_expired(now).await?;
        if expired.is_empty() {
            return Ok(0);
        }

        info!(
            trace_id = %ctx.trace_id,
            count = expired.len(),
            "Safety-net: found expired holds to reconcile"
        );

        let mut cleaned = 0;
        for (index, hold) in expired.iter().enumerate() {
            match self.reconcile_hold(hold).await {
                Ok(true) => cleaned += 1,
                Ok(false) => {}
                Err(e) if e.is_cache_unavailable() => {
                    // Lock keys cannot be consulted, so the per-hold skip
                    // is impossible. The record-store expiry is still the
                    // payment-window truth (confirm rejects overdue holds
                    // regardless of lock state), so finish the pass with
                    // the bulk guard.
                    warn!(
                        trace_id = %ctx.trace_id,
                        error = %e,
                        "Lock store unreachable, switching to bulk expiry sweep"
                    );
                    match self.degraded_sweep(&expired[index..], now).await {
                        Ok(swept) => cleaned += swept,
                        Err(sweep_err) => {
                            error!(error = %sweep_err, "Degraded expiry sweep failed");
                        }
                    }
                    break;
                }
                Err(e) => {
                    // One bad hold must not abort the tick.
                    error!(hold_token = %hold.hold_token, error = %e, "Failed to reconcile hold");
                }
            }
        }

        if cleaned > 0 {
            info!(cleaned, "Safety-net: reconciled expired holds");
        }
        Ok(cleaned)
    }

    /// Bulk cleanup for a lock-store outage: release the remaining holds'
    /// seats and expire every overdue hold in one transaction.
    ///
    /// `now` must be the same boundary the holds were selected with, so
    /// the bulk update covers exactly the selected set plus holds this
    /// tick already settled (which are no longer `ACTIVE`).
    async fn degraded_sweep(
        &self,
        holds: &[SeatHold],
        now: chrono::DateTime<Utc>,
    ) -> AppResult<usize> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin sweep transaction", e)
        })?;
        let mut effects = SideEffects::new();

        for hold in holds {
            self.seat_repo.release_seats(&mut tx, &hold.seat_ids).await?;

            {
                let overlay = Arc::clone(&self.overlay);
                let seat_ids = hold.seat_ids.clone();
                let event_id = hold.event_id;
                effects.after_commit(async move {
                    if let Err(e) = overlay
                        .set_status_many(event_id, &seat_ids, SeatStatus::Available)
                        .await
                    {
                        error!(event_id, error = %e, "Failed to update overlay after sweep");
                    }
                });
            }
            {
                let publisher = Arc::clone(&self.publisher);
                let audit = SeatHoldAuditEvent::new(
                    SeatHoldAuditEvent::EXPIRED,
                    &hold.hold_token,
                    hold.customer_id,
                    hold.event_id,
                    hold.seat_ids.clone(),
                    HoldStatus::Expired.as_str(),
                    hold.expires_at,
                );
                effects.after_commit(async move {
                    publisher.publish_hold_audit(&audit).await;
                });
            }
        }

        let marked = self.hold_repo.mark_expired(&mut tx, now).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit sweep transaction", e)
        })?;
        effects.committed().await;

        info!(marked, "Degraded sweep expired overdue holds");
        Ok(marked as usize)
    }

    /// Reconcile a single durably-expired hold. Returns `false` when the
    /// hold was skipped because a lock key still exists.
    async fn reconcile_hold(&self, hold: &SeatHold) -> AppResult<bool> {
        let owner = hold.owner_value();

        // If any lock still names this hold, its TTL has not fired yet
        // (clock skew); treat the TTL as authoritative and skip.
        for &seat_id in &hold.seat_ids {
            if let Some(value) = self.locks.peek(hold.event_id, seat_id).await? {
                if value == owner {
                    debug!(hold_token = %hold.hold_token, seat_id, "Lock key still present, skipping");
                    return Ok(false);
                }
            }
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to begin reconcile transaction",
                e,
            )
        })?;
        let mut effects = SideEffects::new();

        {
            let overlay = Arc::clone(&self.overlay);
            let seat_ids = hold.seat_ids.clone();
            let event_id = hold.event_id;
            effects.after_rollback(async move {
                if let Err(e) = overlay
                    .set_status_many(event_id, &seat_ids, SeatStatus::Held)
                    .await
                {
                    error!(event_id, error = %e, "Failed to re-affirm overlay after reconcile rollback");
                }
            });
        }

        let result: AppResult<u64> = {
            match self.seat_repo.release_seats(&mut tx, &hold.seat_ids).await {
                Ok(released) => self
                    .hold_repo
                    .set_status(&mut tx, hold.id, HoldStatus::Expired)
                    .await
                    .map(|_| released),
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(released) => {
                {
                    let overlay = Arc::clone(&self.overlay);
                    let seat_ids = hold.seat_ids.clone();
                    let event_id = hold.event_id;
                    effects.after_commit(async move {
                        if let Err(e) = overlay
                            .set_status_many(event_id, &seat_ids, SeatStatus::Available)
                            .await
                        {
                            error!(event_id, error = %e, "Failed to update overlay after reconcile");
                        }
                    });
                }
                {
                    let publisher = Arc::clone(&self.publisher);
                    let audit = SeatHoldAuditEvent::new(
                        SeatHoldAuditEvent::EXPIRED,
                        &hold.hold_token,
                        hold.customer_id,
                        hold.event_id,
                        hold.seat_ids.clone(),
                        HoldStatus::Expired.as_str(),
                        hold.expires_at,
                    );
                    effects.after_commit(async move {
                        publisher.publish_hold_audit(&audit).await;
                    });
                }

                tx.commit().await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to commit reconcile transaction",
                        e,
                    )
                })?;
                effects.committed().await;

                info!(
                    hold_token = %hold.hold_token,
                    released,
                    "Safety-net: cleaned up expired hold"
                );
                Ok(true)
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    error!(error = %rb, "Failed to roll back reconcile transaction");
                }
                effects.rolled_back().await;
                Err(e)
            }
        }
    }
}
