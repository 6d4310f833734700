//! # boxoffice-database
//!
//! The record store: PostgreSQL connection management, embedded migrations,
//! typed repositories over seats, holds, and bookings, and the transaction
//! side-effect registry that sequences overlay/event-log writes around
//! commit and rollback.
//!
//! The record store is the single source of truth. The conditional updates
//! in [`repositories::seat::SeatRepository`] are the authoritative guard
//! against double-booking; every other store is derived from this one.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod side_effects;

pub use connection::DatabasePool;
pub use side_effects::SideEffects;
