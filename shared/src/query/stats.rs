//! Aggregate counts over log entries.

use crate::models::LogEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry counts, overall and per level and component.
///
/// Keys are the exact values found in the entries, so `INFO` and `info` are
/// counted separately even though the filter treats them as equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    /// Number of entries counted.
    pub total: usize,

    /// Entry count per level.
    pub by_level: BTreeMap<String, usize>,

    /// Entry count per component.
    pub by_component: BTreeMap<String, usize>,
}

/// Counts `entries` overall, by level and by component.
///
/// # Example
///
/// ```
/// use shared::query::stats;
///
/// let summary = stats(&[]);
/// assert_eq!(summary.total, 0);
/// assert!(summary.by_level.is_empty());
/// ```
#[must_use]
pub fn stats(entries: &[LogEntry]) -> LogStats {
    let mut summary = LogStats::default();

    for entry in entries {
        summary.total += 1;
        *summary.by_level.entry(entry.level.clone()).or_insert(0) += 1;
        *summary
            .by_component
            .entry(entry.component.clone())
            .or_insert(0) += 1;
    }

    summary
}
