//! Seat repository implementation.
//!
//! The conditional updates here are the authoritative double-booking guard:
//! every status change is predicated on the current status, so a seat can
//! never be moved out from under another holder by a blind write.

use sqlx::{PgConnection, PgPool};

use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::result::AppResult;
use boxoffice_entity::seat::Seat;

/// Repository for seat queries and guarded status transitions.
#[derive(Debug, Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    /// Create a new seat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all seats of an event, ordered by section, row, and number.
    pub async fn find_by_event(&self, event_id: i64) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>(
            "SELECT * FROM seats WHERE event_id = $1 ORDER BY section, row_letter, seat_number",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list event seats", e))
    }

    /// List available seats of an event, ordered by section, row, and number.
    pub async fn find_available_by_event(&self, event_id: i64) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>(
            "SELECT * FROM seats WHERE event_id = $1 AND status = 'AVAILABLE' \
             ORDER BY section, row_letter, seat_number",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list available seats", e)
        })
    }

    /// Count available seats for an event.
    pub async fn count_available_by_event(&self, event_id: i64) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM seats WHERE event_id = $1 AND status = 'AVAILABLE'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count available seats", e)
        })
    }

    /// Fetch seat rows by id within a transaction, ordered by id.
    pub async fn find_by_ids(
        &self,
        conn: &mut PgConnection,
        seat_ids: &[i64],
    ) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = ANY($1) ORDER BY id")
            .bind(seat_ids)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch seats by id", e)
            })
    }

    /// Take row-level write locks on the given seats, in id order.
    ///
    /// Only the degraded hold path uses this; the normal path relies on the
    /// lock store and the status predicate instead of pessimistic locking.
    pub async fn lock_rows(&self, conn: &mut PgConnection, seat_ids: &[i64]) -> AppResult<()> {
        sqlx::query("SELECT id FROM seats WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(seat_ids)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock seat rows", e)
            })?;
        Ok(())
    }

    /// Conditionally move seats to `HELD`, from any status except `BOOKED`.
    ///
    /// Returns the number of rows updated; the caller requires it to equal
    /// the seat-set size. Allowing `HELD → HELD` here covers the window
    /// where a TTL-expired hold has not yet been cleaned up in the record
    /// store — the lock store already arbitrated the new owner.
    pub async fn hold_seats_guarded(
        &self,
        conn: &mut PgConnection,
        seat_ids: &[i64],
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE seats SET status = 'HELD', version = version + 1, updated_at = NOW() \
             WHERE id = ANY($1) AND status <> 'BOOKED'",
        )
        .bind(seat_ids)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to hold seats", e))?;

        Ok(result.rows_affected())
    }

    /// Conditionally move seats from `HELD` to `BOOKED`.
    ///
    /// Returns the number of rows updated; the caller requires equality.
    pub async fn book_seats(&self, conn: &mut PgConnection, seat_ids: &[i64]) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE seats SET status = 'BOOKED', version = version + 1, updated_at = NOW() \
             WHERE id = ANY($1) AND status = 'HELD'",
        )
        .bind(seat_ids)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to book seats", e))?;

        Ok(result.rows_affected())
    }

    /// Conditionally move seats from `HELD` back to `AVAILABLE`.
    ///
    /// Returns the number of rows updated. Zero means the seats were
    /// already released or booked — the idempotency cut for expiry replay.
    pub async fn release_seats(
        &self,
        conn: &mut PgConnection,
        seat_ids: &[i64],
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE seats SET status = 'AVAILABLE', version = version + 1, updated_at = NOW() \
             WHERE id = ANY($1) AND status = 'HELD'",
        )
        .bind(seat_ids)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release seats", e))?;

        Ok(result.rows_affected())
    }
}
