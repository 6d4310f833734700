//! Route definitions for the BoxOffice HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(booking_routes())
        .merge(event_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Booking endpoints: hold, confirm, cancel, lookups.
fn booking_routes() -> Router<AppState> {
    // `{token}` is a hold token on the confirm route and a booking
    // reference on the lookup route; the shared name keeps the two
    // param routes compatible within the matcher.
    Router::new()
        .route("/bookings/hold", post(handlers::booking::hold_seats))
        .route(
            "/bookings/{token}/confirm",
            post(handlers::booking::confirm_booking),
        )
        .route(
            "/bookings/hold/{token}",
            delete(handlers::booking::cancel_hold).get(handlers::booking::get_hold),
        )
        .route("/bookings/{token}", get(handlers::booking::get_booking))
}

/// Event browse endpoints (overlay-merged reads).
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events/{event_id}", get(handlers::event::get_event))
        .route(
            "/events/{event_id}/seats",
            get(handlers::event::get_event_seats),
        )
        .route(
            "/events/{event_id}/seats/available",
            get(handlers::event::get_available_seats),
        )
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors = &state.config.server.cors;

    let origins = if cors.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse::<Method>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any)
        .max_age(Duration::from_secs(cors.max_age_seconds))
}
