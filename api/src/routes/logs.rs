//! Log query endpoints.
//!
//! Provides read-only HTTP endpoints over the log repository: a filtered,
//! paginated listing, aggregate statistics, and lookup by id.

use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::models::LogEntry;
use shared::parser::parse_timestamp;
use shared::query::{filter_entries, paginate, stats, LogFilter, LogStats};
use shared::storage::{LogRepository, RepositoryError};
use validator::Validate;

/// Default page size for `GET /api/logs`.
pub const DEFAULT_LIMIT: usize = 1000;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Query parameters for listing logs.
#[derive(Debug, Deserialize, Validate)]
pub struct LogListParams {
    /// Level to match (case-insensitive).
    pub level: Option<String>,

    /// Component to match (case-insensitive).
    pub component: Option<String>,

    /// Inclusive lower bound, `YYYY-MM-DD HH:MM:SS`.
    pub start_time: Option<String>,

    /// Inclusive upper bound, `YYYY-MM-DD HH:MM:SS`.
    pub end_time: Option<String>,

    /// Reload from disk even if nothing changed.
    #[serde(default)]
    pub refresh: bool,

    /// Number of matching entries to skip.
    #[serde(default)]
    pub offset: usize,

    /// Maximum number of entries to return.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 10_000, message = "limit must be between 1 and 10000"))]
    pub limit: usize,
}

/// Query parameters accepted by the stats and lookup endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshParams {
    /// Reload from disk even if nothing changed.
    #[serde(default)]
    pub refresh: bool,
}

/// Error response for log queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogQueryError {
    /// Error type.
    pub error: String,
    /// Detailed error message.
    pub message: String,
}

type ApiError = (StatusCode, Json<LogQueryError>);

fn api_error(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(LogQueryError {
            error: error.to_string(),
            message: message.into(),
        }),
    )
}

fn query_rejection(rejection: &QueryRejection) -> ApiError {
    api_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        "invalid_query",
        rejection.body_text(),
    )
}

fn parse_bound(value: Option<&str>) -> Result<Option<NaiveDateTime>, ApiError> {
    value
        .map(parse_timestamp)
        .transpose()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, "invalid_timestamp", e.to_string()))
}

/// Runs a repository call on the blocking pool, since loading reads files.
async fn with_repository<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn LogRepository) -> Result<T, RepositoryError> + Send + 'static,
{
    let repository = state.repository().clone();

    tokio::task::spawn_blocking(move || f(repository.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Repository task failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                e.to_string(),
            )
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load log entries");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                e.to_string(),
            )
        })
}

/// Creates the log query routes.
///
/// # Routes
///
/// - `GET /api/logs` - List entries with filtering and pagination
/// - `GET /api/logs/stats` - Counts by level and component
/// - `GET /api/logs/{log_id}` - A single entry
pub fn logs_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/logs", get(list_logs))
        .route("/api/logs/stats", get(log_stats))
        .route("/api/logs/{log_id}", get(get_log))
        .with_state(state)
}

/// Handler for `GET /api/logs`.
///
/// Filters are applied before pagination, so `offset` and `limit` page
/// through the matching entries only.
async fn list_logs(
    State(state): State<AppState>,
    params: Result<Query<LogListParams>, QueryRejection>,
) -> Result<Json<Vec<LogEntry>>, ApiError> {
    let Query(params) = params.map_err(|rejection| query_rejection(&rejection))?;

    params.validate().map_err(|e| {
        api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_failed",
            e.to_string(),
        )
    })?;

    let mut filter = LogFilter::new();
    if let Some(level) = params.level {
        filter = filter.with_level(level);
    }
    if let Some(component) = params.component {
        filter = filter.with_component(component);
    }
    if let Some(start) = parse_bound(params.start_time.as_deref())? {
        filter = filter.with_start_time(start);
    }
    if let Some(end) = parse_bound(params.end_time.as_deref())? {
        filter = filter.with_end_time(end);
    }

    let refresh = params.refresh;
    let entries = with_repository(&state, move |repo| repo.entries(refresh)).await?;
    let matched = filter_entries(&entries, &filter);

    tracing::debug!(
        total = entries.len(),
        matched = matched.len(),
        offset = params.offset,
        limit = params.limit,
        "Listed log entries"
    );

    Ok(Json(paginate(matched, params.offset, params.limit)))
}

/// Handler for `GET /api/logs/stats`.
async fn log_stats(
    State(state): State<AppState>,
    params: Result<Query<RefreshParams>, QueryRejection>,
) -> Result<Json<LogStats>, ApiError> {
    let Query(params) = params.map_err(|rejection| query_rejection(&rejection))?;

    let entries = with_repository(&state, move |repo| repo.entries(params.refresh)).await?;

    Ok(Json(stats(&entries)))
}

/// Handler for `GET /api/logs/{log_id}`.
async fn get_log(
    State(state): State<AppState>,
    Path(log_id): Path<String>,
    params: Result<Query<RefreshParams>, QueryRejection>,
) -> Result<Json<LogEntry>, ApiError> {
    let Query(params) = params.map_err(|rejection| query_rejection(&rejection))?;

    let lookup_id = log_id.clone();
    let entry = with_repository(&state, move |repo| repo.entry(&lookup_id, params.refresh)).await?;

    entry.map(Json).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Log with id {log_id} not found"),
        )
    })
}
