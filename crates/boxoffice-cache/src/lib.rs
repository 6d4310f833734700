//! # boxoffice-cache
//!
//! The lock/overlay store: per-seat TTL locks (the hot path's
//! anti-double-book primitive), the per-event seat-status overlay hash,
//! and the expired-key notification stream that feeds the expiry signaler.
//!
//! Lock and overlay state is derived from the record store; anything lost
//! here is recoverable through the reconciler.

pub mod client;
pub mod expiry;
pub mod keys;
pub mod lock;
pub mod memory;
pub mod overlay;

pub use client::RedisClient;
pub use lock::{RedisSeatLockStore, SeatLockStore};
pub use memory::{MemorySeatLockStore, MemorySeatOverlayStore};
pub use overlay::{RedisSeatOverlayStore, SeatOverlayStore};
