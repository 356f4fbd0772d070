//! Health and readiness endpoints.
//!
//! `/health` answers as long as the process is up. `/ready` additionally loads
//! the log snapshot, so it fails while the log directory cannot be read.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// "ready" or "unavailable".
    pub status: &'static str,
    /// Number of entries in the current snapshot, when ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    /// Why the service is not ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Creates the health and readiness routes.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "logscope-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Loads (or reuses) the log snapshot and reports its size.
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let repository = state.repository().clone();
    let result = tokio::task::spawn_blocking(move || repository.entries(false)).await;

    match result {
        Ok(Ok(entries)) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                entries: Some(entries.len()),
                message: None,
            }),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "unavailable",
                    entries: None,
                    message: Some(e.to_string()),
                }),
            )
        }
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "unavailable",
                entries: None,
                message: Some(e.to_string()),
            }),
        ),
    }
}
