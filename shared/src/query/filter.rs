//! Entry filtering and pagination.

use crate::models::LogEntry;
use chrono::NaiveDateTime;

/// Criteria for selecting log entries.
///
/// All set criteria must hold for an entry to match. Level and component are
/// compared case-insensitively but must match the whole value; both time
/// bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Match entries with this level (case-insensitive, exact).
    pub level: Option<String>,

    /// Match entries from this component (case-insensitive, exact).
    pub component: Option<String>,

    /// Match entries at or after this time.
    pub start_time: Option<NaiveDateTime>,

    /// Match entries at or before this time.
    pub end_time: Option<NaiveDateTime>,
}

impl LogFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level filter.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Sets the component filter.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Sets the inclusive lower time bound.
    #[must_use]
    pub fn with_start_time(mut self, start: NaiveDateTime) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Sets the inclusive upper time bound.
    #[must_use]
    pub fn with_end_time(mut self, end: NaiveDateTime) -> Self {
        self.end_time = Some(end);
        self
    }

    /// Returns true if `entry` satisfies every criterion.
    ///
    /// An empty level or component string places no constraint.
    #[must_use]
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(level) = self.level.as_deref().filter(|l| !l.is_empty()) {
            if entry.level.to_lowercase() != level.to_lowercase() {
                return false;
            }
        }

        if let Some(component) = self.component.as_deref().filter(|c| !c.is_empty()) {
            if entry.component.to_lowercase() != component.to_lowercase() {
                return false;
            }
        }

        if let Some(start) = self.start_time {
            if entry.timestamp < start {
                return false;
            }
        }

        if let Some(end) = self.end_time {
            if entry.timestamp > end {
                return false;
            }
        }

        true
    }
}

/// Returns the entries matching `filter`, in input order.
///
/// # Example
///
/// ```
/// use shared::query::{filter_entries, LogFilter};
///
/// let matched = filter_entries(&[], &LogFilter::new().with_level("error"));
/// assert!(matched.is_empty());
/// ```
#[must_use]
pub fn filter_entries(entries: &[LogEntry], filter: &LogFilter) -> Vec<LogEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}

/// Returns at most `limit` entries starting at `offset`.
///
/// An offset past the end yields an empty list.
#[must_use]
pub fn paginate(entries: Vec<LogEntry>, offset: usize, limit: usize) -> Vec<LogEntry> {
    entries.into_iter().skip(offset).take(limit).collect()
}
