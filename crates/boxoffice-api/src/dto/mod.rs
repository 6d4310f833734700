//! Request DTOs. Response payloads come from the service layer.

pub mod request;

pub use request::{CancelHoldParams, ConfirmBookingRequest, HoldSeatsRequest};
