//! Per-seat TTL locks.
//!
//! `try_acquire` (atomic set-if-absent with expiry) is the only primitive
//! the hot path relies on to prevent concurrent holds. Release is a Lua
//! compare-and-delete so that a slow caller can never delete a lock that
//! has since expired and been re-acquired by someone else.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use boxoffice_core::result::AppResult;

use crate::client::{RedisClient, map_redis_error};
use crate::keys;

/// Lua script for atomic lock release: delete only if the value matches.
const RELEASE_LOCK_SCRIPT: &str = r#"
    if redis.call('GET', KEYS[1]) == ARGV[1] then
      return redis.call('DEL', KEYS[1])
    else
      return 0
    end
"#;

/// Trait for the per-seat lock store.
///
/// Implementations must make `try_acquire` atomic per key; multi-key
/// atomicity is not required (the orchestrator acquires seat by seat and
/// rolls back on failure).
#[async_trait]
pub trait SeatLockStore: Send + Sync + std::fmt::Debug + 'static {
    /// Attempt to acquire the lock for one seat.
    ///
    /// Returns `true` iff the key did not exist and is now owned by
    /// `owner` with the given TTL.
    async fn try_acquire(
        &self,
        event_id: i64,
        seat_id: i64,
        owner: &str,
        ttl: Duration,
    ) -> AppResult<bool>;

    /// Release the lock for one seat if it is still owned by
    /// `expected_owner` (compare-and-delete). Returns `true` if a key was
    /// deleted.
    async fn release(
        &self,
        event_id: i64,
        seat_id: i64,
        expected_owner: &str,
    ) -> AppResult<bool>;

    /// Read the current owner value of a seat lock, if the key exists.
    async fn peek(&self, event_id: i64, seat_id: i64) -> AppResult<Option<String>>;
}

/// Redis-backed seat lock store.
#[derive(Debug, Clone)]
pub struct RedisSeatLockStore {
    client: RedisClient,
}

impl RedisSeatLockStore {
    /// Create a new Redis seat lock store.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SeatLockStore for RedisSeatLockStore {
    async fn try_acquire(
        &self,
        event_id: i64,
        seat_id: i64,
        owner: &str,
        ttl: Duration,
    ) -> AppResult<bool> {
        let key = keys::seat_lock(event_id, seat_id);
        let mut conn = self.client.conn_mut();

        // SET key value EX ttl NX
        let result: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(owner)
            .arg("EX")
            .arg(ttl.as_secs())
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("Seat lock acquire failed", e))?;

        let acquired = result.is_some();
        debug!(key, acquired, "Seat lock acquisition attempt");
        Ok(acquired)
    }

    async fn release(
        &self,
        event_id: i64,
        seat_id: i64,
        expected_owner: &str,
    ) -> AppResult<bool> {
        let key = keys::seat_lock(event_id, seat_id);
        let mut conn = self.client.conn_mut();

        let deleted: i64 = redis::Script::new(RELEASE_LOCK_SCRIPT)
            .key(&key)
            .arg(expected_owner)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("Seat lock release failed", e))?;

        debug!(key, deleted, "Seat lock release attempt");
        Ok(deleted > 0)
    }

    async fn peek(&self, event_id: i64, seat_id: i64) -> AppResult<Option<String>> {
        let key = keys::seat_lock(event_id, seat_id);
        let mut conn = self.client.conn_mut();

        let value: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| map_redis_error("Seat lock read failed", e))?;
        Ok(value)
    }
}
