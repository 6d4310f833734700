//! Event log (Kafka) configuration.

use serde::{Deserialize, Serialize};

/// Kafka producer/consumer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Comma-separated broker addresses.
    #[serde(default = "default_brokers")]
    pub brokers: String,
    /// Client identifier reported to the brokers.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Consumer group for the seat-state transition consumer.
    #[serde(default = "default_group_id")]
    pub group_id: String,
    /// Producer send timeout in milliseconds.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_ms: u64,
    /// Producer acknowledgment mode ("0", "1", or "all").
    #[serde(default = "default_acks")]
    pub acks: String,
    /// Topic names.
    #[serde(default)]
    pub topics: TopicsConfig,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            brokers: default_brokers(),
            client_id: default_client_id(),
            group_id: default_group_id(),
            send_timeout_ms: default_send_timeout(),
            acks: default_acks(),
            topics: TopicsConfig::default(),
        }
    }
}

/// Topic names for all event-log streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// Per-seat state transitions (partition key `{eventId}:{seatId}`).
    #[serde(default = "default_seat_state_transitions")]
    pub seat_state_transitions: String,
    /// Hold-created audit events (partition key = hold token).
    #[serde(default = "default_seat_hold_created")]
    pub seat_hold_created: String,
    /// Hold-confirmed audit events.
    #[serde(default = "default_seat_hold_confirmed")]
    pub seat_hold_confirmed: String,
    /// Hold-cancelled audit events.
    #[serde(default = "default_seat_hold_cancelled")]
    pub seat_hold_cancelled: String,
    /// Hold-expired audit events.
    #[serde(default = "default_seat_hold_expired")]
    pub seat_hold_expired: String,
    /// Booking-confirmed events (partition key = booking reference).
    #[serde(default = "default_booking_confirmed")]
    pub booking_confirmed: String,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            seat_state_transitions: default_seat_state_transitions(),
            seat_hold_created: default_seat_hold_created(),
            seat_hold_confirmed: default_seat_hold_confirmed(),
            seat_hold_cancelled: default_seat_hold_cancelled(),
            seat_hold_expired: default_seat_hold_expired(),
            booking_confirmed: default_booking_confirmed(),
        }
    }
}

fn default_brokers() -> String {
    "localhost:9092".to_string()
}

fn default_client_id() -> String {
    "boxoffice".to_string()
}

fn default_group_id() -> String {
    "boxoffice-seat-state".to_string()
}

fn default_send_timeout() -> u64 {
    5000
}

fn default_acks() -> String {
    "all".to_string()
}

fn default_seat_state_transitions() -> String {
    "seat-state-transitions".to_string()
}

fn default_seat_hold_created() -> String {
    "seat-hold-created".to_string()
}

fn default_seat_hold_confirmed() -> String {
    "seat-hold-confirmed".to_string()
}

fn default_seat_hold_cancelled() -> String {
    "seat-hold-cancelled".to_string()
}

fn default_seat_hold_expired() -> String {
    "seat-hold-expired".to_string()
}

fn default_booking_confirmed() -> String {
    "booking-confirmed".to_string()
}
