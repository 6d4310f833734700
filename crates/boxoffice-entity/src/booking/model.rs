//! Booking entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::BookingStatus;

/// A confirmed purchase of a seat set, converted from a hold.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique row identifier.
    pub id: i64,
    /// Human-friendly booking reference, unique.
    pub booking_reference: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Booked seat ids.
    pub seat_ids: Vec<i64>,
    /// Total amount paid.
    pub total_amount: Decimal,
    /// Current status.
    pub status: BookingStatus,
    /// Payment gateway reference.
    pub payment_id: Option<String>,
    /// The hold this booking was converted from.
    pub hold_token: String,
    /// When the booking row was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was confirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When the booking was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Data required to insert a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// Human-friendly booking reference.
    pub booking_reference: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Booked seat ids.
    pub seat_ids: Vec<i64>,
    /// Total amount paid.
    pub total_amount: Decimal,
    /// Payment gateway reference.
    pub payment_id: String,
    /// The originating hold token.
    pub hold_token: String,
    /// When the booking was confirmed.
    pub confirmed_at: DateTime<Utc>,
}
