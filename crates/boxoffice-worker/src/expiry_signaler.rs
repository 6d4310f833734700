//! Expiry signaler — keyspace notifications to transition events.
//!
//! Listens for expired keys on the shared logical database, filters for
//! seat-lock keys, and emits one `SEAT_HOLD_EXPIRED` transition per seat.
//! Performs no database work: it is a cheap, crash-tolerant translator.
//! Notifications lost while it is down are recovered by the reconciler.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::watch;
use tokio::time;
use tracing::{error, info, warn};

use boxoffice_cache::expiry::subscribe_expired_keys;
use boxoffice_cache::keys::{ExpiredKey, parse_expired_key};
use boxoffice_core::config::CacheConfig;
use boxoffice_core::events::SeatStateTransitionEvent;
use boxoffice_messaging::EventPublisher;

/// The expiry signaler task.
#[derive(Debug)]
pub struct ExpirySignaler {
    redis_url: String,
    pattern: String,
    resubscribe_delay: Duration,
    publisher: Arc<EventPublisher>,
}

impl ExpirySignaler {
    /// Create a new signaler.
    pub fn new(config: &CacheConfig, publisher: Arc<EventPublisher>) -> Self {
        Self {
            redis_url: config.url.clone(),
            pattern: config.keyevent_pattern.clone(),
            resubscribe_delay: Duration::from_secs(config.resubscribe_delay_seconds),
            publisher,
        }
    }

    /// Run until the cancel signal fires. Re-subscribes with a delay
    /// whenever the notification connection drops.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(pattern = %self.pattern, "Expiry signaler started");

        loop {
            if *cancel.borrow() {
                break;
            }

            let subscription_cancel = cancel.clone();
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        break;
                    }
                }
                _ = self.subscribe_and_forward(subscription_cancel) => {
                    warn!(
                        delay_seconds = self.resubscribe_delay.as_secs(),
                        "Expired-key subscription ended, re-subscribing"
                    );
                    tokio::select! {
                        _ = cancel.changed() => {
                            if *cancel.borrow() {
                                break;
                            }
                        }
                        _ = time::sleep(self.resubscribe_delay) => {}
                    }
                }
            }
        }

        info!("Expiry signaler stopped");
    }

    /// One subscription lifetime: forward keys until the stream ends or
    /// cancellation fires.
    async fn subscribe_and_forward(&self, mut cancel: watch::Receiver<bool>) {
        let stream = match subscribe_expired_keys(&self.redis_url, &self.pattern).await {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "Failed to subscribe to expired-key notifications");
                return;
            }
        };
        tokio::pin!(stream);

        info!("Subscribed to expired-key notifications");

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        return;
                    }
                }
                key = stream.next() => {
                    match key {
                        Some(key) => self.handle_expired_key(&key).await,
                        None => return,
                    }
                }
            }
        }
    }

    /// Classify one expired key and emit the transition if it is ours.
    async fn handle_expired_key(&self, key: &str) {
        match parse_expired_key(key) {
            ExpiredKey::SeatLock { event_id, seat_id } => {
                info!(event_id, seat_id, "Seat hold lock expired");

                let event = SeatStateTransitionEvent::hold_expired(event_id, seat_id);
                if let Err(e) = self.publisher.publish_seat_transition(&event).await {
                    error!(
                        event_id,
                        seat_id,
                        error = %e,
                        "Failed to publish seat expiry transition"
                    );
                }
            }
            ExpiredKey::Malformed => {
                warn!(key, "Unexpected seat key format in expiry notification");
            }
            ExpiredKey::Other => {}
        }
    }
}
