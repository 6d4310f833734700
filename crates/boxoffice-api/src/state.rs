//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use boxoffice_core::config::AppConfig;
use boxoffice_service::BookingService;
use boxoffice_service::EventReadService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Hold orchestrator.
    pub booking_service: Arc<BookingService>,
    /// Overlay-merged event read service.
    pub event_read_service: Arc<EventReadService>,
}
