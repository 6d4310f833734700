//! Per-event seat-status overlay.
//!
//! One hash per event, field = seat id, value = current status. A seat can
//! only ever have one overlay value (overwriting semantics), which is what
//! makes the overlay safe to read alongside the record store. The hash TTL
//! is refreshed on every write; a cold overlay simply falls back to
//! database state.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, warn};

use boxoffice_core::result::AppResult;
use boxoffice_entity::seat::SeatStatus;

use crate::client::{RedisClient, map_redis_error};
use crate::keys;

/// Trait for the seat-status overlay store.
#[async_trait]
pub trait SeatOverlayStore: Send + Sync + std::fmt::Debug + 'static {
    /// Set the overlay status of a single seat, refreshing the hash TTL.
    async fn set_status(&self, event_id: i64, seat_id: i64, status: SeatStatus) -> AppResult<()>;

    /// Set the overlay status of several seats in one write, refreshing the
    /// hash TTL.
    async fn set_status_many(
        &self,
        event_id: i64,
        seat_ids: &[i64],
        status: SeatStatus,
    ) -> AppResult<()>;

    /// Fetch the full overlay for an event: seat id → status.
    async fn event_overlay(&self, event_id: i64) -> AppResult<HashMap<i64, SeatStatus>>;

    /// Drop the whole overlay hash for an event.
    async fn clear(&self, event_id: i64) -> AppResult<()>;
}

/// Redis-backed overlay store.
#[derive(Debug, Clone)]
pub struct RedisSeatOverlayStore {
    client: RedisClient,
    ttl: Duration,
}

impl RedisSeatOverlayStore {
    /// Create a new overlay store with the given hash TTL.
    pub fn new(client: RedisClient, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl: Duration::from_secs(ttl_seconds),
        }
    }
}

#[async_trait]
impl SeatOverlayStore for RedisSeatOverlayStore {
    async fn set_status(&self, event_id: i64, seat_id: i64, status: SeatStatus) -> AppResult<()> {
        let key = keys::seat_status_overlay(event_id);
        let mut conn = self.client.conn_mut();

        let _: () = conn
            .hset(&key, seat_id.to_string(), status.as_str())
            .await
            .map_err(|e| map_redis_error("Overlay write failed", e))?;
        let _: bool = conn
            .expire(&key, self.ttl.as_secs() as i64)
            .await
            .map_err(|e| map_redis_error("Overlay TTL refresh failed", e))?;

        debug!(event_id, seat_id, status = %status, "Overlay status set");
        Ok(())
    }

    async fn set_status_many(
        &self,
        event_id: i64,
        seat_ids: &[i64],
        status: SeatStatus,
    ) -> AppResult<()> {
        if seat_ids.is_empty() {
            return Ok(());
        }

        let key = keys::seat_status_overlay(event_id);
        let entries: Vec<(String, &str)> = seat_ids
            .iter()
            .map(|id| (id.to_string(), status.as_str()))
            .collect();
        let mut conn = self.client.conn_mut();

        let _: () = conn
            .hset_multiple(&key, &entries)
            .await
            .map_err(|e| map_redis_error("Overlay batch write failed", e))?;
        let _: bool = conn
            .expire(&key, self.ttl.as_secs() as i64)
            .await
            .map_err(|e| map_redis_error("Overlay TTL refresh failed", e))?;

        debug!(
            event_id,
            seats = seat_ids.len(),
            status = %status,
            "Overlay statuses set"
        );
        Ok(())
    }

    async fn event_overlay(&self, event_id: i64) -> AppResult<HashMap<i64, SeatStatus>> {
        let key = keys::seat_status_overlay(event_id);
        let mut conn = self.client.conn_mut();

        let raw: HashMap<String, String> = conn
            .hgetall(&key)
            .await
            .map_err(|e| map_redis_error("Overlay read failed", e))?;

        let mut overlay = HashMap::with_capacity(raw.len());
        for (field, value) in raw {
            match (field.parse::<i64>(), SeatStatus::from_str(&value)) {
                (Ok(seat_id), Ok(status)) => {
                    overlay.insert(seat_id, status);
                }
                _ => {
                    warn!(event_id, field, value, "Dropping unparseable overlay entry");
                }
            }
        }
        Ok(overlay)
    }

    async fn clear(&self, event_id: i64) -> AppResult<()> {
        let key = keys::seat_status_overlay(event_id);
        let mut conn = self.client.conn_mut();

        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| map_redis_error("Overlay clear failed", e))?;
        Ok(())
    }
}
