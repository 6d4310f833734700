//! Event browse handlers — the overlay-merged read path.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use boxoffice_core::error::AppError;

use crate::state::AppState;

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_read_service.get_event(event_id).await?;
    Ok(Json(event))
}

/// GET /api/events/{id}/seats
pub async fn get_event_seats(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let view = state
        .event_read_service
        .get_event_with_seats(event_id)
        .await?;
    Ok(Json(view))
}

/// GET /api/events/{id}/seats/available
pub async fn get_available_seats(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let seats = state
        .event_read_service
        .get_available_seats(event_id)
        .await?;
    Ok(Json(seats))
}
