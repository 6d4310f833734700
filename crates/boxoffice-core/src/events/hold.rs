//! Hold-level audit events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-seat detail attached to hold-created events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeldSeatInfo {
    /// Seat id.
    pub seat_id: i64,
    /// Section name.
    pub section: String,
    /// Row letter.
    pub row_letter: String,
    /// Seat number within the row.
    pub seat_number: i32,
    /// Seat price.
    pub price: Decimal,
}

/// A hold lifecycle audit event on one of the `seat-hold-*` topics.
///
/// Partitioned by hold token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatHoldAuditEvent {
    /// `SEAT_HOLD_CREATED`, `SEAT_HOLD_CONFIRMED`, `SEAT_HOLD_CANCELLED`,
    /// or `SEAT_HOLD_EXPIRED`.
    pub event_type: String,
    /// The opaque hold token.
    pub hold_token: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Seats covered by the hold.
    pub seat_ids: Vec<i64>,
    /// Hold status after the transition.
    pub status: String,
    /// When the hold expires.
    pub expires_at: DateTime<Utc>,
    /// Seat detail, present only on created events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<Vec<HeldSeatInfo>>,
    /// Epoch milliseconds at emission.
    pub timestamp: i64,
    /// Originating component.
    pub source: String,
}

impl SeatHoldAuditEvent {
    /// Build an audit event for a hold lifecycle transition.
    pub fn new(
        event_type: &str,
        hold_token: impl Into<String>,
        customer_id: i64,
        event_id: i64,
        seat_ids: Vec<i64>,
        status: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type: event_type.to_string(),
            hold_token: hold_token.into(),
            customer_id,
            event_id,
            seat_ids,
            status: status.into(),
            expires_at,
            seats: None,
            timestamp: super::epoch_millis(),
            source: super::SOURCE_BOOKING_SERVICE.to_string(),
        }
    }

    /// Attach per-seat detail (created events only).
    pub fn with_seats(mut self, seats: Vec<HeldSeatInfo>) -> Self {
        self.seats = Some(seats);
        self
    }

    /// Event type for hold creation.
    pub const CREATED: &'static str = "SEAT_HOLD_CREATED";
    /// Event type for hold confirmation.
    pub const CONFIRMED: &'static str = "SEAT_HOLD_CONFIRMED";
    /// Event type for hold cancellation.
    pub const CANCELLED: &'static str = "SEAT_HOLD_CANCELLED";
    /// Event type for hold expiry.
    pub const EXPIRED: &'static str = "SEAT_HOLD_EXPIRED";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_event_wire_shape() {
        let event = SeatHoldAuditEvent::new(
            SeatHoldAuditEvent::EXPIRED,
            "HOLD_ABC",
            100,
            1,
            vec![10, 11],
            "EXPIRED",
            Utc::now(),
        );
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();

        assert_eq!(json["eventType"], "SEAT_HOLD_EXPIRED");
        assert_eq!(json["holdToken"], "HOLD_ABC");
        assert_eq!(json["customerId"], 100);
        assert_eq!(json["seatIds"], serde_json::json!([10, 11]));
        assert_eq!(json["source"], "booking-service");
        assert!(json.get("seats").is_none());
    }

    #[test]
    fn created_event_carries_seat_detail() {
        let event = SeatHoldAuditEvent::new(
            SeatHoldAuditEvent::CREATED,
            "HOLD_ABC",
            100,
            1,
            vec![10],
            "ACTIVE",
            Utc::now(),
        )
        .with_seats(vec![HeldSeatInfo {
            seat_id: 10,
            section: "VIP".to_string(),
            row_letter: "A".to_string(),
            seat_number: 1,
            price: Decimal::new(9950, 2),
        }]);

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(json["seats"][0]["seatId"], 10);
        assert_eq!(json["seats"][0]["rowLetter"], "A");
    }
}
