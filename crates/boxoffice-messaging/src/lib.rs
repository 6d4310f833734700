//! # boxoffice-messaging
//!
//! Event-log plumbing: the producer used by the orchestrator, expiry
//! signaler, and reconciler, and the consumer construction used by the
//! seat-state transition pipeline.
//!
//! Delivery is at-least-once; every consumer must be idempotent. Audit
//! publish failures are logged and never propagate into the user-visible
//! operation — the record store has already settled by the time anything
//! is published.

pub mod consumer;
pub mod producer;

pub use consumer::build_stream_consumer;
pub use producer::EventPublisher;
