//! # boxoffice-service
//!
//! The synchronous protocol core: the hold orchestrator (place, confirm,
//! cancel) that owns ordering and rollback across the three data planes,
//! and the read assembler that merges record-store seat rows with the
//! overlay for near-real-time browsing.

pub mod booking;
pub mod context;
pub mod event;

pub use booking::service::BookingService;
pub use context::RequestContext;
pub use event::service::EventReadService;
