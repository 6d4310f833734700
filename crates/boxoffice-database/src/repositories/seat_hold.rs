//! Seat-hold repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::result::AppResult;
use boxoffice_entity::hold::{CreateSeatHold, HoldStatus, SeatHold};

/// Repository for seat-hold rows.
#[derive(Debug, Clone)]
pub struct SeatHoldRepository {
    pool: PgPool,
}

impl SeatHoldRepository {
    /// Create a new seat-hold repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new `ACTIVE` hold within a transaction.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        data: &CreateSeatHold,
    ) -> AppResult<SeatHold> {
        sqlx::query_as::<_, SeatHold>(
            "INSERT INTO seat_holds \
             (hold_token, customer_id, event_id, seat_ids, seat_count, expires_at, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'ACTIVE') RETURNING *",
        )
        .bind(&data.hold_token)
        .bind(data.customer_id)
        .bind(data.event_id)
        .bind(&data.seat_ids)
        .bind(data.seat_ids.len() as i32)
        .bind(data.expires_at)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create seat hold", e))
    }

    /// Find a hold by its token.
    pub async fn find_by_token(&self, hold_token: &str) -> AppResult<Option<SeatHold>> {
        sqlx::query_as::<_, SeatHold>("SELECT * FROM seat_holds WHERE hold_token = $1")
            .bind(hold_token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find hold by token", e)
            })
    }

    /// Find a hold by its token, taking a row-level write lock.
    ///
    /// Used by the cancel path so that concurrent cancel/expire attempts on
    /// the same hold serialize on the row.
    pub async fn find_by_token_for_update(
        &self,
        conn: &mut PgConnection,
        hold_token: &str,
    ) -> AppResult<Option<SeatHold>> {
        sqlx::query_as::<_, SeatHold>("SELECT * FROM seat_holds WHERE hold_token = $1 FOR UPDATE")
            .bind(hold_token)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock hold by token", e)
            })
    }

    /// Set the status of a hold within a transaction.
    pub async fn set_status(
        &self,
        conn: &mut PgConnection,
        hold_id: i64,
        status: HoldStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE seat_holds SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(hold_id)
            .bind(status)
            .execute(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update hold status", e)
            })?;
        Ok(())
    }

    /// All `ACTIVE` holds whose expiry has passed (reconciler input).
    pub async fn find_expired(&self, now: DateTime<Utc>) -> AppResult<Vec<SeatHold>> {
        sqlx::query_as::<_, SeatHold>(
            "SELECT * FROM seat_holds WHERE status = 'ACTIVE' AND expires_at <= $1",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find expired holds", e))
    }

    /// Expired `ACTIVE` holds of an event that contain the given seat.
    ///
    /// Used by the transition consumer when a per-seat lock TTL fires.
    pub async fn find_expired_for_seat(
        &self,
        conn: &mut PgConnection,
        event_id: i64,
        seat_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<SeatHold>> {
        sqlx::query_as::<_, SeatHold>(
            "SELECT * FROM seat_holds WHERE event_id = $1 AND status = 'ACTIVE' \
             AND expires_at <= $3 AND $2 = ANY(seat_ids)",
        )
        .bind(event_id)
        .bind(seat_id)
        .bind(now)
        .fetch_all(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find expired holds for seat", e)
        })
    }

    /// Bulk-expire every `ACTIVE` hold with `expires_at <= now`. Returns
    /// the number of rows updated.
    ///
    /// Used by the reconciler's degraded sweep when the lock store is
    /// unreachable and TTLs cannot be consulted; the caller releases the
    /// affected seats in the same transaction, using the same `now`
    /// boundary it selected the holds with.
    pub async fn mark_expired(
        &self,
        conn: &mut PgConnection,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE seat_holds SET status = 'EXPIRED', updated_at = NOW() \
             WHERE status = 'ACTIVE' AND expires_at <= $1",
        )
        .bind(now)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to bulk-expire holds", e))?;

        Ok(result.rows_affected())
    }
}
