//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/bookings/hold`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HoldSeatsRequest {
    /// The requesting customer.
    pub customer_id: i64,
    /// The event the seats belong to.
    pub event_id: i64,
    /// Requested seat ids, in lock-acquisition order.
    #[validate(length(min = 1, message = "At least one seat id is required"))]
    pub seat_ids: Vec<i64>,
    /// Optional override of the configured hold duration.
    pub hold_duration_minutes: Option<u64>,
}

/// Body of `POST /api/bookings/{holdToken}/confirm`.
///
/// The path token is authoritative; a token in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingRequest {
    /// Redundant copy of the hold token, accepted for client convenience.
    pub hold_token: Option<String>,
    /// Must match the hold's owner.
    pub customer_id: i64,
    /// Payment gateway reference.
    #[validate(length(min = 1, message = "Payment id is required"))]
    pub payment_id: String,
}

/// Query of `DELETE /api/bookings/hold/{holdToken}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelHoldParams {
    /// Must match the hold's owner.
    pub customer_id: i64,
}
