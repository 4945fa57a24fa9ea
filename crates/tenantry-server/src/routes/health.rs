use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Liveness health check. Does not touch the database.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check.
///
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.db().ping().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
