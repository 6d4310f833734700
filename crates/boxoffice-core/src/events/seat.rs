//! Per-seat state transition events.

use serde::{Deserialize, Serialize};

/// A single-seat state transition on the `seat-state-transitions` topic.
///
/// Partitioned by `{eventId}:{seatId}` so all transitions for one seat are
/// consumed in order. The expiry signaler emits these when a per-seat lock
/// key expires; the transition consumer applies them to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatStateTransitionEvent {
    /// Transition type, e.g. `SEAT_HOLD_EXPIRED`.
    pub event_type: String,
    /// The owning event's id.
    pub event_id: i64,
    /// The seat id.
    pub seat_id: i64,
    /// Epoch milliseconds at emission.
    pub timestamp: i64,
    /// Originating component.
    pub source: String,
}

impl SeatStateTransitionEvent {
    /// Transition type emitted when a seat-hold lock TTL fires.
    pub const SEAT_HOLD_EXPIRED: &'static str = "SEAT_HOLD_EXPIRED";

    /// Build an expiry transition for one seat, sourced from the lock TTL.
    pub fn hold_expired(event_id: i64, seat_id: i64) -> Self {
        Self {
            event_type: Self::SEAT_HOLD_EXPIRED.to_string(),
            event_id,
            seat_id,
            timestamp: super::epoch_millis(),
            source: super::SOURCE_LOCK_TTL.to_string(),
        }
    }

    /// Partition key: `{eventId}:{seatId}`.
    pub fn partition_key(&self) -> String {
        format!("{}:{}", self.event_id, self.seat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_event_wire_shape() {
        let event = SeatStateTransitionEvent::hold_expired(1, 10);
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();

        assert_eq!(json["eventType"], "SEAT_HOLD_EXPIRED");
        assert_eq!(json["eventId"], 1);
        assert_eq!(json["seatId"], 10);
        assert_eq!(json["source"], "lock-ttl");
        assert!(json["timestamp"].is_i64());
    }

    #[test]
    fn partition_key_serializes_per_seat() {
        let event = SeatStateTransitionEvent::hold_expired(42, 7);
        assert_eq!(event.partition_key(), "42:7");
    }
}
