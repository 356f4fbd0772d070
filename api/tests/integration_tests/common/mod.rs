//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including log directory fixtures and HTTP request helpers.

use api::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tempfile::TempDir;

/// Creates a test router over a fresh temporary log directory.
///
/// # Arguments
///
/// * `files` - `(file name, content)` pairs written before the router is built
///
/// # Returns
///
/// A tuple containing the configured router and the directory guard. The
/// directory is deleted when the guard is dropped.
pub fn test_app(files: &[(&str, &str)]) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        write_log(&dir, name, content);
    }
    let router = create_router(AppState::with_log_dir(dir.path()));
    (router, dir)
}

/// Writes (or overwrites) a log file in the test directory.
pub fn write_log(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

/// Appends one line to an existing log file.
pub fn append_line(dir: &TempDir, name: &str, line: &str) {
    let mut file = OpenOptions::new()
        .append(true)
        .open(dir.path().join(name))
        .unwrap();
    writeln!(file, "{line}").unwrap();
}

/// Helper to make a GET request.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to GET from
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Returns the `id` field of every entry in a listing response.
pub fn ids(response: &Value) -> Vec<String> {
    response
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap().to_string())
        .collect()
}
