//! # boxoffice-worker
//!
//! Long-lived background pipelines, each an explicit task with a start/stop
//! lifecycle driven by a `watch` cancellation channel:
//!
//! - **Expiry signaler** — translates expired lock keys into transition
//!   events. Performs no database work.
//! - **Seat-state consumer** — applies `HELD → AVAILABLE` transitions to
//!   the record store and overlay, idempotently.
//! - **Reconciler** — the periodic safety net that closes the gap between
//!   the record store and the lock store when notifications are lost.

pub mod expiry_signaler;
pub mod reconciler;
pub mod seat_state;

pub use expiry_signaler::ExpirySignaler;
pub use reconciler::HoldReconciler;
pub use seat_state::SeatStateConsumer;
