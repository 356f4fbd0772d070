//! Integration tests for listing and looking up log entries.
//!
//! Tests cover:
//! - Ordering across files and malformed-line tolerance
//! - Filtering by level, component and time range
//! - Pagination
//! - Cache invalidation and forced refresh
//! - Lookup by id

use axum::http::StatusCode;

use super::common::{append_line, get, ids, test_app, write_log};

const AUTH_LOG: &str = "\
2024-01-01 10:00:00\tINFO\tauth\tservice started
2024-01-01 10:01:00\tERROR\tauth\tfailed login
2024-01-01 10:02:00\tError\tAUTH\tfailed again
";

const DB_LOG: &str = "\
2024-01-01 09:00:00\tWARN\tdb\tslow query

2024-01-01 09:30:00\terrors\tdb\tnot an error level
2024-01-01 09:45:00\tINFO\tdb
2024-01-01 10:01:00\terror\tdb\tconnection lost
";

fn time(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[tokio::test]
async fn test_entries_ordered_by_file_then_line() {
    let (app, _dir) = test_app(&[("db.log", DB_LOG), ("auth.log", AUTH_LOG)]);

    let (status, response) = get(app, "/api/logs").await;

    assert_eq!(status, StatusCode::OK);
    // auth.log sorts first; db.log line 2 is blank and line 4 has three fields.
    assert_eq!(
        ids(&response),
        vec!["0-1", "0-2", "0-3", "1-1", "1-3", "1-5"]
    );

    let entries = response.as_array().unwrap();
    assert_eq!(entries[3]["source_file"], "db.log");
    assert_eq!(entries[3]["timestamp"], "2024-01-01T09:00:00");
}

#[tokio::test]
async fn test_round_trip_of_single_line() {
    let (app, _dir) = test_app(&[(
        "app.log",
        "2024-01-01 10:00:00\tERROR\tauth\tfailed login\n",
    )]);

    let (status, response) = get(app, "/api/logs/0-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["id"], "0-1");
    assert_eq!(response["timestamp"], "2024-01-01T10:00:00");
    assert_eq!(response["level"], "ERROR");
    assert_eq!(response["component"], "auth");
    assert_eq!(response["message"], "failed login");
    assert_eq!(response["source_file"], "app.log");
    assert_eq!(response["line_no"], 1);
}

#[tokio::test]
async fn test_filter_level_case_insensitive_exact() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG), ("db.log", DB_LOG)]);

    let (status, response) = get(app, "/api/logs?level=error").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response), vec!["0-2", "0-3", "1-5"]);
}

#[tokio::test]
async fn test_filter_level_and_component() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG), ("db.log", DB_LOG)]);

    let (status, response) = get(app, "/api/logs?level=ERROR&component=auth").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response), vec!["0-2", "0-3"]);
}

#[tokio::test]
async fn test_filter_time_range() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG), ("db.log", DB_LOG)]);

    let uri = format!(
        "/api/logs?start_time={}&end_time={}",
        time("2024-01-01 09:30:00"),
        time("2024-01-01 10:01:00")
    );
    let (status, response) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response), vec!["0-1", "0-2", "1-3", "1-5"]);
}

#[tokio::test]
async fn test_filter_single_instant() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG), ("db.log", DB_LOG)]);

    let instant = time("2024-01-01 10:01:00");
    let uri = format!("/api/logs?start_time={instant}&end_time={instant}");
    let (status, response) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response), vec!["0-2", "1-5"]);
}

#[tokio::test]
async fn test_invalid_time_filter_rejected() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG)]);

    let uri = format!("/api/logs?end_time={}", time("2024-01-01T10:00:00"));
    let (status, response) = get(app, &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "invalid_timestamp");
}

#[tokio::test]
async fn test_loose_timestamp_layouts_rejected() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG)]);

    for value in [
        "2024-01-0110:00:00",
        "24-01-01 10:00:00",
        "+2024-01-01 10:00:00",
    ] {
        let uri = format!("/api/logs?start_time={}", time(value));
        let (status, response) = get(app.clone(), &uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{value}");
        assert_eq!(response["error"], "invalid_timestamp");
    }
}

#[tokio::test]
async fn test_pagination_applies_after_filtering() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG), ("db.log", DB_LOG)]);

    let (status, response) = get(app.clone(), "/api/logs?level=error&offset=1&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response), vec!["0-3"]);

    let (status, response) = get(app, "/api/logs?offset=50").await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_query_parameters() {
    let (app, _dir) = test_app(&[("auth.log", AUTH_LOG)]);

    let (status, response) = get(app.clone(), "/api/logs?limit=20000").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "validation_failed");

    let (status, response) = get(app, "/api/logs?refresh=maybe").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "invalid_query");
}

#[tokio::test]
async fn test_appended_line_visible_without_refresh() {
    let (app, dir) = test_app(&[("auth.log", AUTH_LOG)]);

    let (_, response) = get(app.clone(), "/api/logs").await;
    assert_eq!(response.as_array().unwrap().len(), 3);

    append_line(&dir, "auth.log", "2024-01-01 10:03:00\tINFO\tauth\tlogged out");

    let (status, response) = get(app, "/api/logs").await;
    assert_eq!(status, StatusCode::OK);
    let entries = response.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3]["id"], "0-4");
    assert_eq!(entries[3]["message"], "logged out");
}

#[tokio::test]
async fn test_forced_refresh() {
    let (app, dir) = test_app(&[("auth.log", AUTH_LOG)]);

    let (_, response) = get(app.clone(), "/api/logs").await;
    assert_eq!(response.as_array().unwrap().len(), 3);

    write_log(&dir, "zz.log", "2024-01-02 00:00:00\tINFO\tcron\tnightly run\n");

    let (status, response) = get(app, "/api/logs/1-1?refresh=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["component"], "cron");
}

#[tokio::test]
async fn test_new_file_shifts_ids() {
    let (app, dir) = test_app(&[("m.log", "2024-01-01 10:00:00\tINFO\tapi\tfrom m\n")]);

    let (_, response) = get(app.clone(), "/api/logs/0-1").await;
    assert_eq!(response["message"], "from m");

    write_log(&dir, "a.log", "2024-01-01 10:00:00\tINFO\tapi\tfrom a\n");

    let (_, response) = get(app.clone(), "/api/logs/0-1").await;
    assert_eq!(response["message"], "from a");

    let (_, response) = get(app, "/api/logs/1-1").await;
    assert_eq!(response["message"], "from m");
}

#[tokio::test]
async fn test_ids_unique_in_listing() {
    let (app, _dir) = test_app(&[
        ("a.log", AUTH_LOG),
        ("b.log", AUTH_LOG),
        ("c.log", DB_LOG),
    ]);

    let (_, response) = get(app, "/api/logs").await;
    let mut all = ids(&response);
    let count = all.len();
    all.sort();
    all.dedup();

    assert_eq!(count, 9);
    assert_eq!(all.len(), count);
}
