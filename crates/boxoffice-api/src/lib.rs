//! # boxoffice-api
//!
//! The HTTP facade over the seat-hold core: Axum router, handlers, and
//! request/response DTOs. All domain decisions live in the service layer;
//! handlers translate between HTTP and service calls.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
