//! Booking handlers — hold, confirm, cancel, lookups.

use std::time::Duration;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use tracing::info;
use validator::Validate;

use boxoffice_core::error::AppError;
use boxoffice_service::RequestContext;
use boxoffice_service::booking::{ConfirmBookingCommand, PlaceHoldCommand, PlaceHoldOutcome};

use crate::dto::request::{CancelHoldParams, ConfirmBookingRequest, HoldSeatsRequest};
use crate::state::AppState;

/// Build the per-request context with the configured deadline.
fn request_context(state: &AppState) -> RequestContext {
    RequestContext::new()
        .with_timeout(Duration::from_secs(state.config.server.request_timeout_seconds))
}

/// POST /api/bookings/hold
pub async fn hold_seats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<HoldSeatsRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let idempotency_key = headers
        .get("x-idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let ctx = request_context(&state);
    info!(
        trace_id = %ctx.trace_id,
        customer_id = req.customer_id,
        event_id = req.event_id,
        seats = req.seat_ids.len(),
        "Seat hold request received"
    );

    let outcome = state
        .booking_service
        .place_hold(
            &ctx,
            PlaceHoldCommand {
                customer_id: req.customer_id,
                event_id: req.event_id,
                seat_ids: req.seat_ids,
                hold_duration_minutes: req.hold_duration_minutes,
                idempotency_key,
            },
        )
        .await?;

    match outcome {
        PlaceHoldOutcome::Placed(response) | PlaceHoldOutcome::Degraded(response) => {
            Ok((StatusCode::CREATED, Json(response)))
        }
        PlaceHoldOutcome::Unavailable(reason) => Err(AppError::seats_unavailable(reason)),
        PlaceHoldOutcome::Invalid(reason) => Err(AppError::validation(reason)),
    }
}

/// POST /api/bookings/{holdToken}/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    Path(hold_token): Path<String>,
    Json(req): Json<ConfirmBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let ctx = request_context(&state);
    info!(trace_id = %ctx.trace_id, hold_token = %hold_token, customer_id = req.customer_id, "Booking confirmation request");

    let booking = state
        .booking_service
        .confirm_booking(
            &ctx,
            ConfirmBookingCommand {
                hold_token,
                customer_id: req.customer_id,
                payment_id: req.payment_id,
            },
        )
        .await?;

    Ok(Json(booking))
}

/// DELETE /api/bookings/hold/{holdToken}
pub async fn cancel_hold(
    State(state): State<AppState>,
    Path(hold_token): Path<String>,
    Query(params): Query<CancelHoldParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = request_context(&state);
    info!(trace_id = %ctx.trace_id, hold_token = %hold_token, customer_id = params.customer_id, "Seat hold cancellation request");

    state
        .booking_service
        .cancel_hold(&ctx, &hold_token, params.customer_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/bookings/hold/{holdToken}
pub async fn get_hold(
    State(state): State<AppState>,
    Path(hold_token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hold = state.booking_service.get_hold(&hold_token).await?;
    Ok(Json(hold))
}

/// GET /api/bookings/{bookingReference}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_reference): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.get_booking(&booking_reference).await?;
    Ok(Json(booking))
}
