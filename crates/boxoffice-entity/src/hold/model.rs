//! Seat-hold entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::HoldStatus;

/// A time-bounded reservation of a seat set by one customer.
///
/// At most one `ACTIVE` hold may reference any given seat id at any time.
/// That invariant is enforced by the per-seat lock store plus the seat
/// repository's conditional updates, not by a database constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeatHold {
    /// Unique row identifier.
    pub id: i64,
    /// Opaque hold token handed to the customer.
    pub hold_token: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event. The seat set belongs entirely to this event.
    pub event_id: i64,
    /// Held seat ids, in request order.
    pub seat_ids: Vec<i64>,
    /// Number of held seats.
    pub seat_count: i32,
    /// When the hold expires.
    pub expires_at: DateTime<Utc>,
    /// Current status.
    pub status: HoldStatus,
    /// When the hold was created.
    pub created_at: DateTime<Utc>,
    /// When the hold was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl SeatHold {
    /// Whether the payment window has elapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the hold still reserves its seats.
    pub fn is_active(&self) -> bool {
        self.status == HoldStatus::Active && !self.is_expired()
    }

    /// Seconds until expiry, floored at zero.
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }

    /// The lock-store owner value for this hold: `{customerId}:{holdToken}`.
    pub fn owner_value(&self) -> String {
        format!("{}:{}", self.customer_id, self.hold_token)
    }
}

/// Data required to create a new seat hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSeatHold {
    /// Opaque hold token.
    pub hold_token: String,
    /// Owning customer.
    pub customer_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Held seat ids, in request order.
    pub seat_ids: Vec<i64>,
    /// When the hold expires.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn hold(expires_at: DateTime<Utc>, status: HoldStatus) -> SeatHold {
        SeatHold {
            id: 1,
            hold_token: "HOLD_TEST".to_string(),
            customer_id: 100,
            event_id: 1,
            seat_ids: vec![10, 11],
            seat_count: 2,
            expires_at,
            status,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn active_hold_within_window() {
        let h = hold(Utc::now() + Duration::minutes(10), HoldStatus::Active);
        assert!(h.is_active());
        assert!(h.remaining_seconds() > 0);
    }

    #[test]
    fn active_status_past_expiry_is_not_active() {
        let h = hold(Utc::now() - Duration::seconds(1), HoldStatus::Active);
        assert!(!h.is_active());
        assert_eq!(h.remaining_seconds(), 0);
    }

    #[test]
    fn terminal_statuses_are_never_active() {
        for status in [
            HoldStatus::Expired,
            HoldStatus::Confirmed,
            HoldStatus::Cancelled,
        ] {
            let h = hold(Utc::now() + Duration::minutes(10), status);
            assert!(!h.is_active());
            assert!(status.is_terminal());
        }
    }

    #[test]
    fn owner_value_format() {
        let h = hold(Utc::now(), HoldStatus::Active);
        assert_eq!(h.owner_value(), "100:HOLD_TEST");
    }
}
