//! Booking confirmation events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A confirmed booking on the `booking-confirmed` topic.
///
/// Partitioned by booking reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmedEvent {
    /// Always `BOOKING_CONFIRMED`.
    pub event_type: String,
    /// Human-friendly booking reference.
    pub booking_reference: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Seats covered by the booking.
    pub seat_ids: Vec<i64>,
    /// Total amount paid.
    pub total_amount: Decimal,
    /// Payment gateway reference.
    pub payment_id: String,
    /// The hold the booking was converted from.
    pub hold_token: String,
    /// When the booking was confirmed.
    pub confirmed_at: DateTime<Utc>,
    /// Epoch milliseconds at emission.
    pub timestamp: i64,
    /// Originating component.
    pub source: String,
}

impl BookingConfirmedEvent {
    /// Event type constant.
    pub const EVENT_TYPE: &'static str = "BOOKING_CONFIRMED";

    /// Build a booking-confirmed event.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        booking_reference: impl Into<String>,
        customer_id: i64,
        event_id: i64,
        seat_ids: Vec<i64>,
        total_amount: Decimal,
        payment_id: impl Into<String>,
        hold_token: impl Into<String>,
        confirmed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type: Self::EVENT_TYPE.to_string(),
            booking_reference: booking_reference.into(),
            customer_id,
            event_id,
            seat_ids,
            total_amount,
            payment_id: payment_id.into(),
            hold_token: hold_token.into(),
            confirmed_at,
            timestamp: super::epoch_millis(),
            source: super::SOURCE_BOOKING_SERVICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_confirmed_wire_shape() {
        let event = BookingConfirmedEvent::new(
            "AB12CD34",
            100,
            1,
            vec![10, 11],
            Decimal::new(19900, 2),
            "PAY_123",
            "HOLD_ABC",
            Utc::now(),
        );
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();

        assert_eq!(json["eventType"], "BOOKING_CONFIRMED");
        assert_eq!(json["bookingReference"], "AB12CD34");
        assert_eq!(json["paymentId"], "PAY_123");
        assert_eq!(json["holdToken"], "HOLD_ABC");
        assert_eq!(json["totalAmount"], "199.00");
    }
}
