//! Event browsing: the overlay-merged read path.

pub mod dto;
pub mod service;

pub use dto::{EventSeatsView, EventSummary, SeatView};
pub use service::EventReadService;
