//! Booking repository implementation.

use sqlx::{PgConnection, PgPool};

use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::result::AppResult;
use boxoffice_entity::booking::{Booking, CreateBooking};

/// Repository for booking rows.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a confirmed booking within a transaction.
    ///
    /// A duplicate booking reference surfaces as `ErrorKind::Conflict` so
    /// the caller can mint a fresh reference and retry.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        data: &CreateBooking,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings \
             (booking_reference, customer_id, event_id, seat_ids, total_amount, status, \
              payment_id, hold_token, confirmed_at) \
             VALUES ($1, $2, $3, $4, $5, 'CONFIRMED', $6, $7, $8) RETURNING *",
        )
        .bind(&data.booking_reference)
        .bind(data.customer_id)
        .bind(data.event_id)
        .bind(&data.seat_ids)
        .bind(data.total_amount)
        .bind(&data.payment_id)
        .bind(&data.hold_token)
        .bind(data.confirmed_at)
        .fetch_one(conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::conflict(format!(
                "Booking reference collision: {}",
                data.booking_reference
            )),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create booking", e),
        })
    }

    /// Find a booking by its reference.
    pub async fn find_by_reference(&self, reference: &str) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking", e)
            })
    }

    /// Find the booking converted from a given hold, if any.
    pub async fn find_by_hold_token(&self, hold_token: &str) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE hold_token = $1")
            .bind(hold_token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking by hold", e)
            })
    }
}
