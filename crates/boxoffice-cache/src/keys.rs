//! Key builders and parsers for all BoxOffice lock/overlay entries.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the application uses. These formats are wire contracts shared
//! with the keyspace-notification pipeline; changing them breaks expiry
//! signaling.

/// Key of the per-seat hold lock: `seat:{eventId}:{seatId}:HELD`.
///
/// Presence of this key means an active hold owns the seat; its TTL is the
/// hold duration.
pub fn seat_lock(event_id: i64, seat_id: i64) -> String {
    format!("seat:{event_id}:{seat_id}:HELD")
}

/// Value stored under a seat lock: `{customerId}:{holdToken}`.
pub fn lock_owner(customer_id: i64, hold_token: &str) -> String {
    format!("{customer_id}:{hold_token}")
}

/// Key of the per-event seat-status overlay hash: `{eventId}:seat_status`.
pub fn seat_status_overlay(event_id: i64) -> String {
    format!("{event_id}:seat_status")
}

/// Result of classifying an expired key from a keyspace notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiredKey {
    /// A seat lock key; carries the parsed event and seat ids.
    SeatLock {
        /// The owning event's id.
        event_id: i64,
        /// The seat id.
        seat_id: i64,
    },
    /// A seat-shaped key that could not be parsed.
    Malformed,
    /// Some other key; not ours to handle.
    Other,
}

/// Classify an expired key name.
///
/// Only keys matching `seat:{eventId}:{seatId}:HELD` concern the expiry
/// signaler; everything else in the shared logical database is ignored.
pub fn parse_expired_key(key: &str) -> ExpiredKey {
    if !key.starts_with("seat:") || !key.ends_with(":HELD") {
        return ExpiredKey::Other;
    }

    let parts: Vec<&str> = key.split(':').collect();
    if parts.len() != 4 {
        return ExpiredKey::Malformed;
    }

    match (parts[1].parse::<i64>(), parts[2].parse::<i64>()) {
        (Ok(event_id), Ok(seat_id)) => ExpiredKey::SeatLock { event_id, seat_id },
        _ => ExpiredKey::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_key_format() {
        assert_eq!(seat_lock(1, 10), "seat:1:10:HELD");
    }

    #[test]
    fn owner_value_format() {
        assert_eq!(lock_owner(100, "HOLD_ABC"), "100:HOLD_ABC");
    }

    #[test]
    fn overlay_key_format() {
        assert_eq!(seat_status_overlay(1), "1:seat_status");
    }

    #[test]
    fn parses_valid_lock_key() {
        assert_eq!(
            parse_expired_key("seat:1:10:HELD"),
            ExpiredKey::SeatLock {
                event_id: 1,
                seat_id: 10
            }
        );
    }

    #[test]
    fn ignores_foreign_keys() {
        assert_eq!(parse_expired_key("session:42"), ExpiredKey::Other);
        assert_eq!(parse_expired_key("1:seat_status"), ExpiredKey::Other);
        assert_eq!(parse_expired_key("seat:1:10:LOCKED"), ExpiredKey::Other);
    }

    #[test]
    fn flags_malformed_seat_keys() {
        assert_eq!(parse_expired_key("seat:1:HELD"), ExpiredKey::Malformed);
        assert_eq!(parse_expired_key("seat:x:10:HELD"), ExpiredKey::Malformed);
        assert_eq!(parse_expired_key("seat:1:2:3:HELD"), ExpiredKey::Malformed);
    }

    #[test]
    fn lock_key_round_trips_through_parser() {
        let key = seat_lock(987, 654);
        assert_eq!(
            parse_expired_key(&key),
            ExpiredKey::SeatLock {
                event_id: 987,
                seat_id: 654
            }
        );
    }
}
