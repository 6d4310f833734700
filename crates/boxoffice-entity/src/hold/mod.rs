//! Seat-hold domain entities.

pub mod model;
pub mod status;

pub use model::{CreateSeatHold, SeatHold};
pub use status::HoldStatus;
