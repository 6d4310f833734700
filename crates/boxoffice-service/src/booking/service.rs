//! The hold orchestrator.
//!
//! Owns the ordering between the three data planes on every synchronous
//! operation:
//!
//! 1. per-seat locks in the lock store (hot-path contention arbiter),
//! 2. one record-store transaction (the authoritative state change),
//! 3. post-commit overlay writes and event-log publishes.
//!
//! The record store is the ground truth throughout: a lock that vanished
//! (store restart, TTL racing a confirm by a few milliseconds) never blocks
//! an operation the `status` predicate allows.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Acquire, PgPool, Postgres, Transaction};
use tracing::{error, info, warn};

use boxoffice_cache::keys;
use boxoffice_cache::lock::SeatLockStore;
use boxoffice_cache::overlay::SeatOverlayStore;
use boxoffice_core::config::BookingConfig;
use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::events::{BookingConfirmedEvent, HeldSeatInfo, SeatHoldAuditEvent};
use boxoffice_core::result::AppResult;
use boxoffice_core::token;
use boxoffice_database::SideEffects;
use boxoffice_database::repositories::{
    BookingRepository, EventRepository, SeatHoldRepository, SeatRepository,
};
use boxoffice_entity::booking::{Booking, CreateBooking};
use boxoffice_entity::hold::{CreateSeatHold, HoldStatus, SeatHold};
use boxoffice_entity::seat::{Seat, SeatStatus};
use boxoffice_messaging::EventPublisher;

use crate::context::RequestContext;

use super::dto::{BookingDto, HoldResponse, SeatHoldDto};
use super::outcome::PlaceHoldOutcome;

/// Upper bound for a client-supplied hold duration, in minutes.
const MAX_HOLD_DURATION_MINUTES: u64 = 60;

/// Attempts to mint a unique booking reference before giving up.
const MAX_REFERENCE_ATTEMPTS: u32 = 3;

/// Request to place a hold.
#[derive(Debug, Clone)]
pub struct PlaceHoldCommand {
    /// The requesting customer.
    pub customer_id: i64,
    /// The event the seats belong to.
    pub event_id: i64,
    /// Requested seat ids; locks are acquired in this order.
    pub seat_ids: Vec<i64>,
    /// Optional override of the configured hold duration.
    pub hold_duration_minutes: Option<u64>,
    /// Client-supplied idempotency key, recorded for tracing.
    pub idempotency_key: Option<String>,
}

/// Request to confirm a booking from a hold.
#[derive(Debug, Clone)]
pub struct ConfirmBookingCommand {
    /// The hold to convert.
    pub hold_token: String,
    /// Must match the hold's owner.
    pub customer_id: i64,
    /// Payment gateway reference.
    pub payment_id: String,
}

/// The hold orchestrator. Stateless and reentrant; holds no in-process
/// locks beyond record-store row locks and lock-store keys.
#[derive(Debug, Clone)]
pub struct BookingService {
    pool: PgPool,
    event_repo: EventRepository,
    seat_repo: SeatRepository,
    hold_repo: SeatHoldRepository,
    booking_repo: BookingRepository,
    locks: Arc<dyn SeatLockStore>,
    overlay: Arc<dyn SeatOverlayStore>,
    publisher: Arc<EventPublisher>,
    config: BookingConfig,
}

impl BookingService {
    /// Create a new hold orchestrator.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        event_repo: EventRepository,
        seat_repo: SeatRepository,
        hold_repo: SeatHoldRepository,
        booking_repo: BookingRepository,
        locks: Arc<dyn SeatLockStore>,
        overlay: Arc<dyn SeatOverlayStore>,
        publisher: Arc<EventPublisher>,
        config: BookingConfig,
    ) -> Self {
        Self {
            pool,
            event_repo,
            seat_repo,
            hold_repo,
            booking_repo,
            locks,
            overlay,
            publisher,
            config,
        }
    }

    // ── PlaceHold ────────────────────────────────────────────

    /// Place a hold over a seat set.
    ///
    /// Business outcomes (contention, invalid input) are returned as
    /// [`PlaceHoldOutcome`] values; only infrastructure failures are errors.
    pub async fn place_hold(
        &self,
        ctx: &RequestContext,
        cmd: PlaceHoldCommand,
    ) -> AppResult<PlaceHoldOutcome> {
        ctx.check_deadline()?;

        if let Some(reason) = validate_place(&cmd, self.config.max_seats_per_hold) {
            return Ok(PlaceHoldOutcome::Invalid(reason));
        }

        let event = match self.event_repo.find_by_id(cmd.event_id).await? {
            Some(event) => event,
            None => {
                return Ok(PlaceHoldOutcome::Invalid(format!(
                    "Event {} not found",
                    cmd.event_id
                )));
            }
        };
        if !event.is_bookable() {
            return Ok(PlaceHoldOutcome::Invalid(format!(
                "Event {} is not open for booking",
                cmd.event_id
            )));
        }

        let hold_minutes = cmd
            .hold_duration_minutes
            .unwrap_or(self.config.hold_duration_minutes);
        let hold_ttl = Duration::from_secs(hold_minutes * 60);
        let hold_token = token::hold_token();
        let owner = keys::lock_owner(cmd.customer_id, &hold_token);

        if let Some(key) = &cmd.idempotency_key {
            info!(trace_id = %ctx.trace_id, idempotency_key = %key, "Hold request carries idempotency key");
        }

        // Acquire all locks or none, in the request's seat order.
        let mut degraded = false;
        let mut acquired: Vec<i64> = Vec::with_capacity(cmd.seat_ids.len());
        for &seat_id in &cmd.seat_ids {
            match self
                .locks
                .try_acquire(cmd.event_id, seat_id, &owner, hold_ttl)
                .await
            {
                Ok(true) => acquired.push(seat_id),
                Ok(false) => {
                    self.release_locks(cmd.event_id, &acquired, &owner).await;
                    info!(
                        trace_id = %ctx.trace_id,
                        event_id = cmd.event_id,
                        seat_id,
                        "Seat lock contention, rejecting hold"
                    );
                    return Ok(PlaceHoldOutcome::Unavailable(
                        "One or more seats are currently held by another customer".to_string(),
                    ));
                }
                Err(e) if e.is_cache_unavailable() => {
                    warn!(
                        trace_id = %ctx.trace_id,
                        error = %e,
                        "Lock store unreachable, falling back to DB-only guarding"
                    );
                    degraded = true;
                    acquired.clear();
                    break;
                }
                Err(e) => {
                    self.release_locks(cmd.event_id, &acquired, &owner).await;
                    return Err(e);
                }
            }
        }

        if let Err(e) = ctx.check_deadline() {
            if !degraded {
                self.release_locks(cmd.event_id, &cmd.seat_ids, &owner).await;
            }
            return Err(e);
        }

        let expires_at = Utc::now() + chrono::Duration::seconds(hold_ttl.as_secs() as i64);

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin hold transaction", e)
        })?;
        let mut effects = SideEffects::new();

        // Rollback leaves the seats untouched; re-affirm AVAILABLE so a
        // poisoned overlay entry cannot outlive the attempt.
        {
            let overlay = Arc::clone(&self.overlay);
            let seat_ids = cmd.seat_ids.clone();
            let event_id = cmd.event_id;
            effects.after_rollback(async move {
                if let Err(e) = overlay
                    .set_status_many(event_id, &seat_ids, SeatStatus::Available)
                    .await
                {
                    error!(event_id, error = %e, "Failed to re-affirm overlay after hold rollback");
                }
            });
        }

        let result = self
            .place_hold_tx(&mut tx, &cmd, &hold_token, expires_at, degraded)
            .await;

        match result {
            Ok((hold, seats)) => {
                let total_amount: Decimal = seats.iter().map(|s| s.price).sum();

                {
                    let overlay = Arc::clone(&self.overlay);
                    let seat_ids = cmd.seat_ids.clone();
                    let event_id = cmd.event_id;
                    effects.after_commit(async move {
                        if let Err(e) = overlay
                            .set_status_many(event_id, &seat_ids, SeatStatus::Held)
                            .await
                        {
                            error!(event_id, error = %e, "Failed to update overlay after hold commit");
                        }
                    });
                }
                {
                    let publisher = Arc::clone(&self.publisher);
                    let audit = SeatHoldAuditEvent::new(
                        SeatHoldAuditEvent::CREATED,
                        &hold.hold_token,
                        hold.customer_id,
                        hold.event_id,
                        hold.seat_ids.clone(),
                        hold.status.as_str(),
                        hold.expires_at,
                    )
                    .with_seats(seats.iter().map(seat_info).collect());
                    effects.after_commit(async move {
                        publisher.publish_hold_audit(&audit).await;
                    });
                }

                if let Err(e) = tx.commit().await {
                    effects.rolled_back().await;
                    if !degraded {
                        self.release_locks(cmd.event_id, &cmd.seat_ids, &owner).await;
                    }
                    return Err(AppError::with_source(
                        ErrorKind::Database,
                        "Failed to commit hold transaction",
                        e,
                    ));
                }
                effects.committed().await;

                info!(
                    trace_id = %ctx.trace_id,
                    hold_token = %hold.hold_token,
                    customer_id = hold.customer_id,
                    event_id = hold.event_id,
                    seats = hold.seat_count,
                    degraded,
                    "Seat hold created"
                );

                let message = if degraded {
                    format!(
                        "Seats held in degraded mode (lock store unavailable). \
                         Complete payment within {hold_minutes} minutes."
                    )
                } else {
                    format!("Seats held successfully. Complete payment within {hold_minutes} minutes.")
                };

                let response = HoldResponse {
                    hold_token: hold.hold_token.clone(),
                    customer_id: hold.customer_id,
                    event_id: hold.event_id,
                    event_title: event.title.clone(),
                    seat_count: hold.seat_count,
                    total_amount,
                    expires_at: hold.expires_at,
                    time_remaining_seconds: hold.remaining_seconds(),
                    status: hold.status.to_string(),
                    created_at: hold.created_at,
                    message,
                };

                if degraded {
                    Ok(PlaceHoldOutcome::Degraded(response))
                } else {
                    Ok(PlaceHoldOutcome::Placed(response))
                }
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    error!(error = %rb, "Failed to roll back hold transaction");
                }
                effects.rolled_back().await;
                if !degraded {
                    self.release_locks(cmd.event_id, &cmd.seat_ids, &owner).await;
                }

                match e.kind {
                    ErrorKind::SeatsUnavailable => Ok(PlaceHoldOutcome::Unavailable(e.message)),
                    ErrorKind::Validation => Ok(PlaceHoldOutcome::Invalid(e.message)),
                    _ => Err(e),
                }
            }
        }
    }

    /// The record-store phase of `PlaceHold`.
    async fn place_hold_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cmd: &PlaceHoldCommand,
        hold_token: &str,
        expires_at: DateTime<Utc>,
        degraded: bool,
    ) -> AppResult<(SeatHold, Vec<Seat>)> {
        // Degraded path only: without lock-store arbitration, row locks
        // serialize concurrent holders on the same seats.
        if degraded {
            self.seat_repo.lock_rows(&mut *tx, &cmd.seat_ids).await?;
        }

        let affected = self
            .seat_repo
            .hold_seats_guarded(&mut *tx, &cmd.seat_ids)
            .await?;
        if affected != cmd.seat_ids.len() as u64 {
            return Err(AppError::seats_unavailable(
                "One or more selected seats are no longer available",
            ));
        }

        let seats = self.seat_repo.find_by_ids(&mut *tx, &cmd.seat_ids).await?;
        if seats.len() != cmd.seat_ids.len() {
            return Err(AppError::validation("Some seats were not found"));
        }
        if seats.iter().any(|s| s.event_id != cmd.event_id) {
            return Err(AppError::validation(
                "All seats must belong to the requested event",
            ));
        }

        let hold = self
            .hold_repo
            .create(
                &mut *tx,
                &CreateSeatHold {
                    hold_token: hold_token.to_string(),
                    customer_id: cmd.customer_id,
                    event_id: cmd.event_id,
                    seat_ids: cmd.seat_ids.clone(),
                    expires_at,
                },
            )
            .await?;

        Ok((hold, seats))
    }

    // ── ConfirmBooking ───────────────────────────────────────

    /// Convert an active hold into a confirmed booking.
    pub async fn confirm_booking(
        &self,
        ctx: &RequestContext,
        cmd: ConfirmBookingCommand,
    ) -> AppResult<BookingDto> {
        ctx.check_deadline()?;

        if cmd.hold_token.trim().is_empty() {
            return Err(AppError::validation("Hold token is required"));
        }
        if cmd.payment_id.trim().is_empty() {
            return Err(AppError::validation("Payment id is required"));
        }

        // No row lock needed here: the `status = 'HELD'` predicate in
        // book_seats is sufficient arbitration.
        let hold = self
            .hold_repo
            .find_by_token(&cmd.hold_token)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Seat hold not found: {}", cmd.hold_token))
            })?;

        match hold.status {
            HoldStatus::Active => {}
            HoldStatus::Confirmed => {
                return Err(AppError::conflict("Hold has already been confirmed"));
            }
            HoldStatus::Expired | HoldStatus::Cancelled => {
                return Err(AppError::hold_expired("Hold is no longer active"));
            }
        }
        if hold.is_expired() {
            return Err(AppError::hold_expired("Hold has expired"));
        }
        if hold.customer_id != cmd.customer_id {
            return Err(AppError::customer_mismatch("Invalid customer for this hold"));
        }

        let owner = hold.owner_value();
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin confirm transaction", e)
        })?;
        let mut effects = SideEffects::new();

        // Rollback leaves the seats HELD; re-affirm that in the overlay.
        {
            let overlay = Arc::clone(&self.overlay);
            let seat_ids = hold.seat_ids.clone();
            let event_id = hold.event_id;
            effects.after_rollback(async move {
                if let Err(e) = overlay
                    .set_status_many(event_id, &seat_ids, SeatStatus::Held)
                    .await
                {
                    error!(event_id, error = %e, "Failed to re-affirm overlay after confirm rollback");
                }
            });
        }

        let result = self.confirm_tx(&mut tx, &hold, &cmd, now).await;

        match result {
            Ok(booking) => {
                {
                    let overlay = Arc::clone(&self.overlay);
                    let seat_ids = hold.seat_ids.clone();
                    let event_id = hold.event_id;
                    effects.after_commit(async move {
                        if let Err(e) = overlay
                            .set_status_many(event_id, &seat_ids, SeatStatus::Booked)
                            .await
                        {
                            error!(event_id, error = %e, "Failed to update overlay after confirm commit");
                        }
                    });
                }
                {
                    // Compare-and-delete each lock; a no-op if the TTL
                    // already fired.
                    let locks = Arc::clone(&self.locks);
                    let seat_ids = hold.seat_ids.clone();
                    let event_id = hold.event_id;
                    let owner = owner.clone();
                    effects.after_commit(async move {
                        for &seat_id in &seat_ids {
                            if let Err(e) = locks.release(event_id, seat_id, &owner).await {
                                warn!(event_id, seat_id, error = %e, "Failed to release lock after confirm");
                            }
                        }
                    });
                }
                {
                    let publisher = Arc::clone(&self.publisher);
                    let booking_event = BookingConfirmedEvent::new(
                        &booking.booking_reference,
                        booking.customer_id,
                        booking.event_id,
                        booking.seat_ids.clone(),
                        booking.total_amount,
                        cmd.payment_id.clone(),
                        &booking.hold_token,
                        now,
                    );
                    let hold_event = SeatHoldAuditEvent::new(
                        SeatHoldAuditEvent::CONFIRMED,
                        &hold.hold_token,
                        hold.customer_id,
                        hold.event_id,
                        hold.seat_ids.clone(),
                        HoldStatus::Confirmed.as_str(),
                        hold.expires_at,
                    );
                    effects.after_commit(async move {
                        publisher.publish_booking_confirmed(&booking_event).await;
                        publisher.publish_hold_audit(&hold_event).await;
                    });
                }

                if let Err(e) = tx.commit().await {
                    effects.rolled_back().await;
                    return Err(AppError::with_source(
                        ErrorKind::Database,
                        "Failed to commit confirm transaction",
                        e,
                    ));
                }
                effects.committed().await;

                info!(
                    trace_id = %ctx.trace_id,
                    booking_reference = %booking.booking_reference,
                    hold_token = %cmd.hold_token,
                    customer_id = cmd.customer_id,
                    "Booking confirmed"
                );

                Ok(BookingDto::from(booking))
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    error!(error = %rb, "Failed to roll back confirm transaction");
                }
                effects.rolled_back().await;
                Err(e)
            }
        }
    }

    /// The record-store phase of `ConfirmBooking`.
    async fn confirm_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        hold: &SeatHold,
        cmd: &ConfirmBookingCommand,
        now: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let booked = self.seat_repo.book_seats(&mut *tx, &hold.seat_ids).await?;
        if booked != hold.seat_ids.len() as u64 {
            // A concurrent expiry released the seats between load and update.
            return Err(AppError::hold_expired(
                "Failed to confirm all seats; the hold's seats were released",
            ));
        }

        self.hold_repo
            .set_status(&mut *tx, hold.id, HoldStatus::Confirmed)
            .await?;

        let seats = self.seat_repo.find_by_ids(&mut *tx, &hold.seat_ids).await?;
        let total_amount: Decimal = seats.iter().map(|s| s.price).sum();

        // Mint-and-insert under a savepoint so a reference collision can be
        // retried without poisoning the outer transaction.
        let mut last_collision = None;
        for attempt in 1..=MAX_REFERENCE_ATTEMPTS {
            let data = CreateBooking {
                booking_reference: token::booking_reference(),
                customer_id: cmd.customer_id,
                event_id: hold.event_id,
                seat_ids: hold.seat_ids.clone(),
                total_amount,
                payment_id: cmd.payment_id.clone(),
                hold_token: hold.hold_token.clone(),
                confirmed_at: now,
            };

            let mut savepoint = tx.begin().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to open savepoint", e)
            })?;

            match self.booking_repo.create(&mut savepoint, &data).await {
                Ok(booking) => {
                    savepoint.commit().await.map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to release savepoint", e)
                    })?;
                    return Ok(booking);
                }
                Err(e) if e.kind == ErrorKind::Conflict => {
                    let _ = savepoint.rollback().await;
                    warn!(attempt, reference = %data.booking_reference, "Booking reference collision, retrying");
                    last_collision = Some(e);
                }
                Err(e) => {
                    let _ = savepoint.rollback().await;
                    return Err(e);
                }
            }
        }

        Err(last_collision
            .unwrap_or_else(|| AppError::internal("Could not mint a unique booking reference")))
    }

    // ── CancelHold ───────────────────────────────────────────

    /// Cancel an active hold, releasing its seats.
    pub async fn cancel_hold(
        &self,
        ctx: &RequestContext,
        hold_token: &str,
        customer_id: i64,
    ) -> AppResult<()> {
        ctx.check_deadline()?;

        if hold_token.trim().is_empty() {
            return Err(AppError::validation("Hold token is required"));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin cancel transaction", e)
        })?;

        // Row lock serializes concurrent cancel/expire on the same hold.
        let hold = self
            .hold_repo
            .find_by_token_for_update(&mut tx, hold_token)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Seat hold not found: {hold_token}")))?;

        if hold.customer_id != customer_id {
            return Err(AppError::customer_mismatch("Invalid customer for this hold"));
        }
        if hold.status != HoldStatus::Active {
            return Err(AppError::validation("Hold is not active"));
        }

        let owner = hold.owner_value();
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
                    error!(event_id, error = %e, "Failed to re-affirm overlay after cancel rollback");
                }
            });
        }

        let result: AppResult<u64> = {
            let released = self.seat_repo.release_seats(&mut tx, &hold.seat_ids).await;
            match released {
                Ok(count) => self
                    .hold_repo
                    .set_status(&mut tx, hold.id, HoldStatus::Cancelled)
                    .await
                    .map(|_| count),
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
                            error!(event_id, error = %e, "Failed to update overlay after cancel commit");
                        }
                    });
                }
                {
                    let locks = Arc::clone(&self.locks);
                    let seat_ids = hold.seat_ids.clone();
                    let event_id = hold.event_id;
                    let owner = owner.clone();
                    effects.after_commit(async move {
                        for &seat_id in &seat_ids {
                            if let Err(e) = locks.release(event_id, seat_id, &owner).await {
                                warn!(event_id, seat_id, error = %e, "Failed to release lock after cancel");
                            }
                        }
                    });
                }
                {
                    let publisher = Arc::clone(&self.publisher);
                    let audit = SeatHoldAuditEvent::new(
                        SeatHoldAuditEvent::CANCELLED,
                        &hold.hold_token,
                        hold.customer_id,
                        hold.event_id,
                        hold.seat_ids.clone(),
                        HoldStatus::Cancelled.as_str(),
                        hold.expires_at,
                    );
                    effects.after_commit(async move {
                        publisher.publish_hold_audit(&audit).await;
                    });
                }

                if let Err(e) = tx.commit().await {
                    effects.rolled_back().await;
                    return Err(AppError::with_source(
                        ErrorKind::Database,
                        "Failed to commit cancel transaction",
                        e,
                    ));
                }
                effects.committed().await;

                info!(
                    trace_id = %ctx.trace_id,
                    hold_token,
                    customer_id,
                    released,
                    "Seat hold cancelled"
                );
                Ok(())
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    error!(error = %rb, "Failed to roll back cancel transaction");
                }
                effects.rolled_back().await;
                Err(e)
            }
        }
    }

    // ── Lookups ──────────────────────────────────────────────

    /// Fetch a hold by token.
    pub async fn get_hold(&self, hold_token: &str) -> AppResult<SeatHoldDto> {
        self.hold_repo
            .find_by_token(hold_token)
            .await?
            .map(SeatHoldDto::from)
            .ok_or_else(|| AppError::not_found(format!("Seat hold not found: {hold_token}")))
    }

    /// Fetch a booking by reference.
    pub async fn get_booking(&self, reference: &str) -> AppResult<BookingDto> {
        self.booking_repo
            .find_by_reference(reference)
            .await?
            .map(BookingDto::from)
            .ok_or_else(|| AppError::not_found(format!("Booking not found: {reference}")))
    }

    // ── Helpers ──────────────────────────────────────────────

    /// Best-effort compare-and-delete of the given locks.
    async fn release_locks(&self, event_id: i64, seat_ids: &[i64], owner: &str) {
        for &seat_id in seat_ids {
            if let Err(e) = self.locks.release(event_id, seat_id, owner).await {
                error!(event_id, seat_id, error = %e, "Failed to release seat lock");
            }
        }
    }
}

/// Validate a place-hold request. Returns the rejection reason, if any.
fn validate_place(cmd: &PlaceHoldCommand, max_seats: usize) -> Option<String> {
    if cmd.seat_ids.is_empty() {
        return Some("Seat ids cannot be empty".to_string());
    }
    if cmd.seat_ids.len() > max_seats {
        return Some(format!("Cannot hold more than {max_seats} seats at once"));
    }

    let distinct: HashSet<i64> = cmd.seat_ids.iter().copied().collect();
    if distinct.len() != cmd.seat_ids.len() {
        return Some("Duplicate seat ids in request".to_string());
    }

    if let Some(minutes) = cmd.hold_duration_minutes {
        if minutes == 0 || minutes > MAX_HOLD_DURATION_MINUTES {
            return Some(format!(
                "Hold duration must be between 1 and {MAX_HOLD_DURATION_MINUTES} minutes"
            ));
        }
    }

    None
}

/// Per-seat audit detail for created events.
fn seat_info(seat: &Seat) -> HeldSeatInfo {
    HeldSeatInfo {
        seat_id: seat.id,
        section: seat.section.clone(),
        row_letter: seat.row_letter.clone(),
        seat_number: seat.seat_number,
        price: seat.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(seat_ids: Vec<i64>) -> PlaceHoldCommand {
        PlaceHoldCommand {
            customer_id: 100,
            event_id: 1,
            seat_ids,
            hold_duration_minutes: None,
            idempotency_key: None,
        }
    }

    #[test]
    fn rejects_empty_seat_set() {
        assert!(validate_place(&cmd(vec![]), 10).is_some());
    }

    #[test]
    fn rejects_oversized_seat_set() {
        assert!(validate_place(&cmd((1..=11).collect()), 10).is_some());
        assert!(validate_place(&cmd((1..=10).collect()), 10).is_none());
    }

    #[test]
    fn rejects_duplicate_seat_ids() {
        assert!(validate_place(&cmd(vec![10, 11, 10]), 10).is_some());
    }

    #[test]
    fn rejects_out_of_range_duration_override() {
        let mut c = cmd(vec![10]);
        c.hold_duration_minutes = Some(0);
        assert!(validate_place(&c, 10).is_some());
        c.hold_duration_minutes = Some(61);
        assert!(validate_place(&c, 10).is_some());
        c.hold_duration_minutes = Some(10);
        assert!(validate_place(&c, 10).is_none());
    }
}
