//! Event-log publisher.

use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use serde::Serialize;
use tracing::{debug, error, info};

use boxoffice_core::config::MessagingConfig;
use boxoffice_core::config::TopicsConfig;
use boxoffice_core::error::AppError;
use boxoffice_core::events::{BookingConfirmedEvent, SeatHoldAuditEvent, SeatStateTransitionEvent};
use boxoffice_core::result::AppResult;

/// Publisher for all BoxOffice topics.
///
/// Transition publishing returns a `Result` so the signaler can surface
/// failures; audit publishing is fire-and-forget (failures are logged,
/// audit lag is acceptable, correctness lives in the record store).
#[derive(Clone)]
pub struct EventPublisher {
    producer: FutureProducer,
    topics: TopicsConfig,
    send_timeout: Duration,
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPublisher")
            .field("topics", &self.topics)
            .finish()
    }
}

impl EventPublisher {
    /// Create a producer from configuration.
    pub fn new(config: &MessagingConfig) -> AppResult<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("client.id", &config.client_id)
            .set("message.timeout.ms", config.send_timeout_ms.to_string())
            .set("acks", &config.acks)
            .create()
            .map_err(|e| AppError::messaging(format!("Failed to create producer: {e}")))?;

        info!(brokers = %config.brokers, acks = %config.acks, "Kafka producer created");

        Ok(Self {
            producer,
            topics: config.topics.clone(),
            send_timeout: Duration::from_millis(config.send_timeout_ms),
        })
    }

    /// Serialize and send one message.
    async fn send_json<T: Serialize>(&self, topic: &str, key: &str, payload: &T) -> AppResult<()> {
        let json = serde_json::to_string(payload)?;

        let record = FutureRecord::to(topic).key(key).payload(&json);
        match self
            .producer
            .send(record, Timeout::After(self.send_timeout))
            .await
        {
            Ok((partition, offset)) => {
                debug!(topic, key, partition, offset, "Event published");
                Ok(())
            }
            Err((e, _)) => Err(AppError::messaging(format!(
                "Failed to publish to '{topic}': {e}"
            ))),
        }
    }

    /// Publish a per-seat transition, keyed `{eventId}:{seatId}` so the
    /// consumer serializes all transitions for one seat.
    pub async fn publish_seat_transition(
        &self,
        event: &SeatStateTransitionEvent,
    ) -> AppResult<()> {
        self.send_json(
            &self.topics.seat_state_transitions,
            &event.partition_key(),
            event,
        )
        .await
    }

    /// Publish a hold audit event to the topic matching its type. Failures
    /// are logged, never returned.
    pub async fn publish_hold_audit(&self, event: &SeatHoldAuditEvent) {
        let topic = match event.event_type.as_str() {
            SeatHoldAuditEvent::CREATED => &self.topics.seat_hold_created,
            SeatHoldAuditEvent::CONFIRMED => &self.topics.seat_hold_confirmed,
            SeatHoldAuditEvent::CANCELLED => &self.topics.seat_hold_cancelled,
            SeatHoldAuditEvent::EXPIRED => &self.topics.seat_hold_expired,
            other => {
                error!(event_type = other, "Unknown hold audit event type, dropping");
                return;
            }
        };

        if let Err(e) = self.send_json(topic, &event.hold_token, event).await {
            error!(
                hold_token = %event.hold_token,
                event_type = %event.event_type,
                error = %e,
                "Failed to publish hold audit event"
            );
        }
    }

    /// Publish a booking confirmation, keyed by booking reference.
    /// Failures are logged, never returned.
    pub async fn publish_booking_confirmed(&self, event: &BookingConfirmedEvent) {
        if let Err(e) = self
            .send_json(&self.topics.booking_confirmed, &event.booking_reference, event)
            .await
        {
            error!(
                booking_reference = %event.booking_reference,
                error = %e,
                "Failed to publish booking confirmed event"
            );
        }
    }
}
