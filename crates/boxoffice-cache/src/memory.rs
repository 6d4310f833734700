//! In-memory lock and overlay stores.
//!
//! Single-node stand-ins for the Redis implementations, used in tests and
//! development setups without a Redis instance. Lock TTLs are honored
//! lazily: an expired entry is treated as absent on the next access. No
//! keyspace notifications are produced, so expiry cleanup falls entirely
//! to the reconciler.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use boxoffice_core::result::AppResult;
use boxoffice_entity::seat::SeatStatus;

use crate::lock::SeatLockStore;
use crate::overlay::SeatOverlayStore;

/// One held lock entry.
#[derive(Debug, Clone)]
struct LockEntry {
    owner: String,
    expires_at: Instant,
}

/// In-memory per-seat lock store.
#[derive(Debug, Default)]
pub struct MemorySeatLockStore {
    locks: Mutex<HashMap<(i64, i64), LockEntry>>,
}

impl MemorySeatLockStore {
    /// Create an empty lock store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeatLockStore for MemorySeatLockStore {
    async fn try_acquire(
        &self,
        event_id: i64,
        seat_id: i64,
        owner: &str,
        ttl: Duration,
    ) -> AppResult<bool> {
        let mut locks = self.locks.lock().unwrap();
        let key = (event_id, seat_id);

        if let Some(entry) = locks.get(&key) {
            if entry.expires_at > Instant::now() {
                return Ok(false);
            }
        }

        locks.insert(
            key,
            LockEntry {
                owner: owner.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(true)
    }

    async fn release(
        &self,
        event_id: i64,
        seat_id: i64,
        expected_owner: &str,
    ) -> AppResult<bool> {
        let mut locks = self.locks.lock().unwrap();
        let key = (event_id, seat_id);

        match locks.get(&key) {
            Some(entry) if entry.owner == expected_owner && entry.expires_at > Instant::now() => {
                locks.remove(&key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn peek(&self, event_id: i64, seat_id: i64) -> AppResult<Option<String>> {
        let locks = self.locks.lock().unwrap();
        Ok(locks
            .get(&(event_id, seat_id))
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.owner.clone()))
    }
}

/// In-memory seat-status overlay store.
#[derive(Debug, Default)]
pub struct MemorySeatOverlayStore {
    overlays: Mutex<HashMap<i64, HashMap<i64, SeatStatus>>>,
}

impl MemorySeatOverlayStore {
    /// Create an empty overlay store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeatOverlayStore for MemorySeatOverlayStore {
    async fn set_status(&self, event_id: i64, seat_id: i64, status: SeatStatus) -> AppResult<()> {
        let mut overlays = self.overlays.lock().unwrap();
        overlays.entry(event_id).or_default().insert(seat_id, status);
        Ok(())
    }

    async fn set_status_many(
        &self,
        event_id: i64,
        seat_ids: &[i64],
        status: SeatStatus,
    ) -> AppResult<()> {
        let mut overlays = self.overlays.lock().unwrap();
        let overlay = overlays.entry(event_id).or_default();
        for &seat_id in seat_ids {
            overlay.insert(seat_id, status);
        }
        Ok(())
    }

    async fn event_overlay(&self, event_id: i64) -> AppResult<HashMap<i64, SeatStatus>> {
        let overlays = self.overlays.lock().unwrap();
        Ok(overlays.get(&event_id).cloned().unwrap_or_default())
    }

    async fn clear(&self, event_id: i64) -> AppResult<()> {
        let mut overlays = self.overlays.lock().unwrap();
        overlays.remove(&event_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    #[tokio::test]
    async fn second_acquirer_is_rejected() {
        let store = MemorySeatLockStore::new();
        assert!(store.try_acquire(1, 10, "100:HOLD_A", TTL).await.unwrap());
        assert!(!store.try_acquire(1, 10, "101:HOLD_B", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn different_seats_lock_independently() {
        let store = MemorySeatLockStore::new();
        assert!(store.try_acquire(1, 10, "100:HOLD_A", TTL).await.unwrap());
        assert!(store.try_acquire(1, 11, "101:HOLD_B", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn release_requires_matching_owner() {
        let store = MemorySeatLockStore::new();
        store.try_acquire(1, 10, "100:HOLD_A", TTL).await.unwrap();

        assert!(!store.release(1, 10, "101:HOLD_B").await.unwrap());
        assert_eq!(
            store.peek(1, 10).await.unwrap(),
            Some("100:HOLD_A".to_string())
        );

        assert!(store.release(1, 10, "100:HOLD_A").await.unwrap());
        assert_eq!(store.peek(1, 10).await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_lock_is_reacquirable() {
        let store = MemorySeatLockStore::new();
        store
            .try_acquire(1, 10, "100:HOLD_A", Duration::from_millis(0))
            .await
            .unwrap();

        assert_eq!(store.peek(1, 10).await.unwrap(), None);
        assert!(store.try_acquire(1, 10, "101:HOLD_B", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn overlay_overwrites_per_seat() {
        let store = MemorySeatOverlayStore::new();
        store
            .set_status_many(1, &[10, 11], SeatStatus::Held)
            .await
            .unwrap();
        store.set_status(1, 10, SeatStatus::Booked).await.unwrap();

        let overlay = store.event_overlay(1).await.unwrap();
        assert_eq!(overlay.get(&10), Some(&SeatStatus::Booked));
        assert_eq!(overlay.get(&11), Some(&SeatStatus::Held));
    }

    #[tokio::test]
    async fn partial_acquisition_rolls_back_all_or_nothing() {
        let store = MemorySeatLockStore::new();
        store.try_acquire(1, 11, "100:HOLD_A", TTL).await.unwrap();

        // Contender B wants {10, 11}: gets 10, fails on 11, releases 10.
        assert!(store.try_acquire(1, 10, "101:HOLD_B", TTL).await.unwrap());
        assert!(!store.try_acquire(1, 11, "101:HOLD_B", TTL).await.unwrap());
        assert!(store.release(1, 10, "101:HOLD_B").await.unwrap());

        // Seat 10 is free again for anyone else.
        assert!(store.try_acquire(1, 10, "102:HOLD_C", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn cleared_overlay_is_empty() {
        let store = MemorySeatOverlayStore::new();
        store.set_status(1, 10, SeatStatus::Held).await.unwrap();
        store.clear(1).await.unwrap();
        assert!(store.event_overlay(1).await.unwrap().is_empty());
    }
}
