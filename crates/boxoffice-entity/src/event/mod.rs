//! Event domain entities.

pub mod model;
pub mod status;

pub use model::Event;
pub use status::EventStatus;
