//! Hold orchestration: place, confirm, and cancel.

pub mod dto;
pub mod outcome;
pub mod service;

pub use dto::{BookingDto, HoldResponse, SeatHoldDto};
pub use outcome::PlaceHoldOutcome;
pub use service::{BookingService, ConfirmBookingCommand, PlaceHoldCommand};
