//! Seat entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::SeatStatus;

/// One sellable seat of an event.
///
/// `(event_id, row_letter, seat_number)` is unique. The `version` column
/// increments on every status change (optimistic concurrency marker);
/// status itself is only ever mutated through the conditional updates in
/// the seat repository.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seat {
    /// Unique seat identifier.
    pub id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Section name (display only).
    pub section: String,
    /// Row letter (display only).
    pub row_letter: String,
    /// Seat number within the row (display only).
    pub seat_number: i32,
    /// Price, fixed-scale decimal, never negative.
    pub price: Decimal,
    /// Current status.
    pub status: SeatStatus,
    /// Monotonic version, bumped on every status change.
    pub version: i64,
    /// When the seat row was created.
    pub created_at: DateTime<Utc>,
    /// When the seat row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Seat {
    /// Human-readable seat label, e.g. `VIP-A12`.
    pub fn label(&self) -> String {
        format!("{}-{}{}", self.section, self.row_letter, self.seat_number)
    }

    /// Whether the seat can currently be held.
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }

    /// Whether the seat is permanently sold.
    pub fn is_booked(&self) -> bool {
        self.status == SeatStatus::Booked
    }
}
