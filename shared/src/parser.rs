//! Line parser for tab-delimited log files.
//!
//! Each non-blank line has the shape
//! `timestamp<TAB>level<TAB>component<TAB>message`, where the timestamp is
//! written as `YYYY-MM-DD HH:MM:SS`. Anything that does not fit is skipped,
//! never treated as an error: one bad line must not cost the rest of the file.

use crate::models::LogEntry;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Format of the timestamp field in log files and of timestamp filters.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of tab-separated fields in a well-formed line.
const FIELD_COUNT: usize = 4;

/// A timestamp string that does not match [`TIMESTAMP_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid datetime format YYYY-MM-DD HH:MM:SS")]
pub struct InvalidTimestamp {
    /// The rejected input.
    pub value: String,
}

/// Why a line did not produce an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The line is empty after trimming.
    Blank,
    /// The line does not split into exactly four fields.
    FieldCount(usize),
    /// The first field is not a valid timestamp.
    InvalidTimestamp,
}

/// Result of parsing one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The line produced an entry.
    Parsed(LogEntry),
    /// The line was ignored.
    Skipped(SkipReason),
}

impl ParseOutcome {
    /// Returns the parsed entry, if any.
    #[must_use]
    pub fn into_entry(self) -> Option<LogEntry> {
        match self {
            Self::Parsed(entry) => Some(entry),
            Self::Skipped(_) => None,
        }
    }
}

/// Parses a timestamp in `YYYY-MM-DD HH:MM:SS` form.
///
/// # Errors
///
/// Returns [`InvalidTimestamp`] if `value` does not match the format exactly.
///
/// # Example
///
/// ```
/// use shared::parser::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-01 10:00:00").is_ok());
/// assert!(parse_timestamp("2024-01-01T10:00:00").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, InvalidTimestamp> {
    let invalid = || InvalidTimestamp {
        value: value.to_string(),
    };

    // chrono tolerates a missing separator, short years and a sign.
    if !has_timestamp_shape(value) {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| invalid())
}

/// Checks the `YYYY-MM-DD<whitespace>HH:MM:SS` layout: a four-digit year,
/// one or two digits for every other field.
fn has_timestamp_shape(value: &str) -> bool {
    let Some((date, time)) = value.split_once(char::is_whitespace) else {
        return false;
    };

    let date: Vec<&str> = date.split('-').collect();
    let time: Vec<&str> = time.trim_start().split(':').collect();

    let &[year, month, day] = date.as_slice() else {
        return false;
    };
    let &[hour, minute, second] = time.as_slice() else {
        return false;
    };

    is_digits(year, 4, 4) && [month, day, hour, minute, second]
        .iter()
        .all(|field| is_digits(field, 1, 2))
}

fn is_digits(field: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&field.len()) && field.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `text` into lines, treating `\r\n`, `\r` and `\n` as line breaks.
///
/// A trailing break does not produce an empty final line.
///
/// # Example
///
/// ```
/// use shared::parser::split_lines;
///
/// let lines: Vec<&str> = split_lines("a\r\nb\rc\n").collect();
/// assert_eq!(lines, vec!["a", "b", "c"]);
/// ```
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(pos) = rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..pos];
        let break_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + break_len..];
        Some(line)
    })
}

/// Parses a single raw line into a [`LogEntry`].
///
/// `file_index` is the position of `source_file` in name-sorted order and
/// `line_no` the 1-based line number; together they form the entry id.
///
/// The message field is everything after the third tab, so tabs inside the
/// message are kept.
#[must_use]
pub fn parse_line(raw: &str, file_index: usize, line_no: usize, source_file: &str) -> ParseOutcome {
    let line = raw.trim();
    if line.is_empty() {
        return ParseOutcome::Skipped(SkipReason::Blank);
    }

    let fields: Vec<&str> = line.splitn(FIELD_COUNT, '\t').collect();
    let &[timestamp, level, component, message] = fields.as_slice() else {
        return ParseOutcome::Skipped(SkipReason::FieldCount(fields.len()));
    };

    let Ok(timestamp) = parse_timestamp(timestamp) else {
        return ParseOutcome::Skipped(SkipReason::InvalidTimestamp);
    };

    ParseOutcome::Parsed(LogEntry {
        id: LogEntry::make_id(file_index, line_no),
        timestamp,
        level: level.trim().to_string(),
        component: component.trim().to_string(),
        message: message.trim().to_string(),
        source_file: source_file.to_string(),
        line_no,
    })
}
