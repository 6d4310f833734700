//! Health handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::state::AppState;

/// GET /api/health
///
/// Reports liveness plus record-store connectivity.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let db_up = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    let status = if db_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if db_up { "up" } else { "degraded" },
            "database": if db_up { "up" } else { "down" },
        })),
    )
}
