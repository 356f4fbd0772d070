//! Log data model.
//!
//! Defines the `LogEntry` structure produced by parsing tab-delimited log files.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single structured log record read from a log file.
///
/// Entries are only ever created by the line parser, so every entry carries
/// a valid timestamp and a 1-based line number.
///
/// # Example
///
/// ```
/// use shared::models::LogEntry;
/// use shared::parser::parse_timestamp;
///
/// let entry = LogEntry {
///     id: "0-1".to_string(),
///     timestamp: parse_timestamp("2024-01-01 10:00:00").unwrap(),
///     level: "ERROR".to_string(),
///     component: "auth".to_string(),
///     message: "failed login".to_string(),
///     source_file: "app.log".to_string(),
///     line_no: 1,
/// };
///
/// assert_eq!(entry.id, LogEntry::make_id(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Identifier of the form `<file_index>-<line_no>`, unique within a snapshot.
    pub id: String,

    /// When the event occurred (second precision, no timezone).
    pub timestamp: NaiveDateTime,

    /// Severity as written in the file, e.g. `INFO` or `error`.
    pub level: String,

    /// Component or subsystem that emitted the line.
    pub component: String,

    /// Free-form message text. May itself contain tabs.
    pub message: String,

    /// File name (not path) the entry was read from.
    pub source_file: String,

    /// 1-based line number within `source_file`.
    pub line_no: usize,
}

impl LogEntry {
    /// Builds the entry id for a line of a given file.
    ///
    /// `file_index` is the position of the file in name-sorted order.
    #[must_use]
    pub fn make_id(file_index: usize, line_no: usize) -> String {
        format!("{file_index}-{line_no}")
    }
}
