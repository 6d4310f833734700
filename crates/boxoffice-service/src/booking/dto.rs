//! Booking-facing DTOs.
//!
//! These are the payloads returned to API clients. Entities never leave
//! the service layer directly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boxoffice_entity::booking::Booking;
use boxoffice_entity::hold::SeatHold;

/// Response to a successful hold placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldResponse {
    /// Opaque hold token; required to confirm or cancel.
    pub hold_token: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Event display title.
    pub event_title: String,
    /// Number of held seats.
    pub seat_count: i32,
    /// Sum of the held seats' prices.
    pub total_amount: Decimal,
    /// When the hold expires.
    pub expires_at: DateTime<Utc>,
    /// Seconds until expiry at response time.
    pub time_remaining_seconds: i64,
    /// Hold status (always `ACTIVE` on placement).
    pub status: String,
    /// When the hold was created.
    pub created_at: DateTime<Utc>,
    /// Customer-facing message; flags degraded mode when applicable.
    pub message: String,
}

/// Full hold detail for lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatHoldDto {
    /// Row id.
    pub id: i64,
    /// Opaque hold token.
    pub hold_token: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Held seat ids.
    pub seat_ids: Vec<i64>,
    /// Number of held seats.
    pub seat_count: i32,
    /// When the hold expires.
    pub expires_at: DateTime<Utc>,
    /// Seconds until expiry, floored at zero.
    pub time_remaining_seconds: i64,
    /// Current status.
    pub status: String,
    /// When the hold was created.
    pub created_at: DateTime<Utc>,
}

impl From<SeatHold> for SeatHoldDto {
    fn from(hold: SeatHold) -> Self {
        let time_remaining_seconds = hold.remaining_seconds();
        Self {
            id: hold.id,
            hold_token: hold.hold_token,
            customer_id: hold.customer_id,
            event_id: hold.event_id,
            seat_ids: hold.seat_ids,
            seat_count: hold.seat_count,
            expires_at: hold.expires_at,
            time_remaining_seconds,
            status: hold.status.to_string(),
            created_at: hold.created_at,
        }
    }
}

/// Full booking detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    /// Row id.
    pub id: i64,
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
    /// Current status.
    pub status: String,
    /// Payment gateway reference.
    pub payment_id: Option<String>,
    /// The originating hold token.
    pub hold_token: String,
    /// When the booking row was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was confirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            booking_reference: booking.booking_reference,
            customer_id: booking.customer_id,
            event_id: booking.event_id,
            seat_ids: booking.seat_ids,
            total_amount: booking.total_amount,
            status: booking.status.to_string(),
            payment_id: booking.payment_id,
            hold_token: booking.hold_token,
            created_at: booking.created_at,
            confirmed_at: booking.confirmed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_entity::hold::HoldStatus;
    use chrono::{Duration, Utc};

    #[test]
    fn hold_dto_carries_remaining_seconds() {
        let hold = SeatHold {
            id: 7,
            hold_token: "HOLD_X".to_string(),
            customer_id: 100,
            event_id: 1,
            seat_ids: vec![10, 11],
            seat_count: 2,
            expires_at: Utc::now() + Duration::minutes(10),
            status: HoldStatus::Active,
            created_at: Utc::now(),
            updated_at: None,
        };

        let dto = SeatHoldDto::from(hold);
        assert_eq!(dto.seat_count, 2);
        assert_eq!(dto.status, "ACTIVE");
        assert!(dto.time_remaining_seconds > 590 && dto.time_remaining_seconds <= 600);
    }

    #[test]
    fn hold_dto_floors_remaining_at_zero() {
        let hold = SeatHold {
            id: 7,
            hold_token: "HOLD_X".to_string(),
            customer_id: 100,
            event_id: 1,
            seat_ids: vec![10],
            seat_count: 1,
            expires_at: Utc::now() - Duration::minutes(1),
            status: HoldStatus::Expired,
            created_at: Utc::now() - Duration::minutes(11),
            updated_at: None,
        };

        let dto = SeatHoldDto::from(hold);
        assert_eq!(dto.time_remaining_seconds, 0);
        assert_eq!(dto.status, "EXPIRED");
    }

    #[test]
    fn hold_response_serializes_camel_case() {
        let response = HoldResponse {
            hold_token: "HOLD_X".to_string(),
            customer_id: 100,
            event_id: 1,
            event_title: "Concert".to_string(),
            seat_count: 2,
            total_amount: rust_decimal::Decimal::new(19900, 2),
            expires_at: Utc::now(),
            time_remaining_seconds: 600,
            status: "ACTIVE".to_string(),
            created_at: Utc::now(),
            message: "ok".to_string(),
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
        assert_eq!(json["holdToken"], "HOLD_X");
        assert_eq!(json["seatCount"], 2);
        assert_eq!(json["timeRemainingSeconds"], 600);
        assert_eq!(json["totalAmount"], "199.00");
    }
}
