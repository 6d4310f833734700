//! Seat-state transition consumer.
//!
//! Consumes `seat-state-transitions`, partitioned by `{eventId}:{seatId}`
//! so all transitions for one seat are serialized. The conditional
//! `release_seats` update is the idempotency cut: replaying a transition
//! for a seat that is already `AVAILABLE` or `BOOKED` changes nothing.
//!
//! Offsets are committed only after the database transaction settles.
//! Malformed payloads and unknown event types are logged and acknowledged
//! to avoid poison-pill stalls; the reconciler covers anything missed.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rdkafka::Message;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::BorrowedMessage;
use sqlx::PgPool;
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info, warn};

use boxoffice_cache::overlay::SeatOverlayStore;
use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::events::{SeatHoldAuditEvent, SeatStateTransitionEvent};
use boxoffice_core::result::AppResult;
use boxoffice_database::SideEffects;
use boxoffice_database::repositories::{SeatHoldRepository, SeatRepository};
use boxoffice_entity::hold::HoldStatus;
use boxoffice_entity::seat::SeatStatus;
use boxoffice_messaging::EventPublisher;
use boxoffice_service::RequestContext;

/// Backoff after a processing failure before polling again.
const FAILURE_BACKOFF: Duration = Duration::from_secs(1);

/// The seat-state transition consumer task.
pub struct SeatStateConsumer {
    pool: PgPool,
    seat_repo: SeatRepository,
    hold_repo: SeatHoldRepository,
    overlay: Arc<dyn SeatOverlayStore>,
    publisher: Arc<EventPublisher>,
    consumer: StreamConsumer,
}

impl std::fmt::Debug for SeatStateConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatStateConsumer").finish()
    }
}

impl SeatStateConsumer {
    /// Create a new transition consumer over an already-subscribed stream.
    pub fn new(
        pool: PgPool,
        seat_repo: SeatRepository,
        hold_repo: SeatHoldRepository,
        overlay: Arc<dyn SeatOverlayStore>,
        publisher: Arc<EventPublisher>,
        consumer: StreamConsumer,
    ) -> Self {
        Self {
            pool,
            seat_repo,
            hold_repo,
            overlay,
            publisher,
            consumer,
        }
    }

    /// Run until the cancel signal fires.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!("Seat-state consumer started");

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        break;
                    }
                }
                received = self.consumer.recv() => {
                    match received {
                        Ok(message) => {
                            match self.process(&message).await {
                                Ok(()) => {
                                    if let Err(e) = self
                                        .consumer
                                        .commit_message(&message, CommitMode::Async)
                                    {
                                        error!(error = %e, "Failed to commit consumer offset");
                                    }
                                }
                                Err(e) => {
                                    // Offset not committed; the message is
                                    // redelivered on restart or rebalance.
                                    error!(
                                        key = ?message.key().map(String::from_utf8_lossy),
                                        error = %e,
                                        "Failed to process seat transition, leaving uncommitted"
                                    );
                                    time::sleep(FAILURE_BACKOFF).await;
                                }
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "Consumer receive error");
                            time::sleep(FAILURE_BACKOFF).await;
                        }
                    }
                }
            }
        }

        info!("Seat-state consumer stopped");
    }

    /// Decode and dispatch one message. `Ok(())` acknowledges; `Err` leaves
    /// the offset uncommitted for redelivery.
    async fn process(&self, message: &BorrowedMessage<'_>) -> AppResult<()> {
        let Some(payload) = message.payload() else {
            warn!("Empty transition payload, acknowledging");
            return Ok(());
        };

        let event: SeatStateTransitionEvent = match serde_json::from_slice(payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Unparseable transition payload, acknowledging");
                return Ok(());
            }
        };

        if event.event_type != SeatStateTransitionEvent::SEAT_HOLD_EXPIRED {
            debug!(event_type = %event.event_type, "Ignoring transition type");
            return Ok(());
        }

        self.handle_seat_expiry(event.event_id, event.seat_id).await
    }

    /// Apply one `HELD → AVAILABLE` expiry transition.
    async fn handle_seat_expiry(&self, event_id: i64, seat_id: i64) -> AppResult<()> {
        let ctx = RequestContext::background("seat-state-consumer");
        info!(trace_id = %ctx.trace_id, event_id, seat_id, "Processing seat expiry");

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin expiry transaction", e)
        })?;
        let mut effects = SideEffects::new();

        let released = self.seat_repo.release_seats(&mut tx, &[seat_id]).await?;
        if released == 0 {
            // Already AVAILABLE or BOOKED: the idempotency cut.
            debug!(event_id, seat_id, "Seat already released or booked, skipping");
            tx.commit().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to commit no-op expiry", e)
            })?;
            return Ok(());
        }

        {
            let overlay = Arc::clone(&self.overlay);
            effects.after_commit(async move {
                if let Err(e) = overlay
                    .set_status(event_id, seat_id, SeatStatus::Available)
                    .await
                {
                    error!(event_id, seat_id, error = %e, "Failed to update overlay after expiry");
                }
            });
        }

        let holds = self
            .hold_repo
            .find_expired_for_seat(&mut tx, event_id, seat_id, Utc::now())
            .await?;

        for hold in &holds {
            self.hold_repo
                .set_status(&mut tx, hold.id, HoldStatus::Expired)
                .await?;

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
            let hold_token = hold.hold_token.clone();
            effects.after_commit(async move {
                publisher.publish_hold_audit(&audit).await;
                info!(hold_token = %hold_token, "Expired hold audit published");
            });
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit expiry transaction", e)
        })?;
        effects.committed().await;

        info!(event_id, seat_id, holds = holds.len(), "Seat released via TTL expiry");
        Ok(())
    }
}
