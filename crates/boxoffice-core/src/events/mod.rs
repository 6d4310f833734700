//! Event-log payload types.
//!
//! Every payload serializes to camelCase JSON and carries `eventType`,
//! `timestamp` (epoch milliseconds), and `source`, plus type-specific
//! fields. These are the wire schemas of the audit and transition topics.

pub mod booking;
pub mod hold;
pub mod seat;

pub use booking::BookingConfirmedEvent;
pub use hold::{HeldSeatInfo, SeatHoldAuditEvent};
pub use seat::SeatStateTransitionEvent;

/// Source tag for events produced by the booking service itself.
pub const SOURCE_BOOKING_SERVICE: &str = "booking-service";

/// Source tag for transition events derived from lock TTL expiry.
pub const SOURCE_LOCK_TTL: &str = "lock-ttl";

/// Current time as epoch milliseconds, the `timestamp` wire field.
pub fn epoch_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
