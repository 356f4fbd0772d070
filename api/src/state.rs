//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use shared::storage::{DirectoryLogRepository, LogRepository};
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the one log repository of the process; cloning the state shares it.
#[derive(Clone)]
pub struct AppState {
    /// The log repository backing all queries.
    repository: Arc<dyn LogRepository>,
}

impl AppState {
    /// Creates a new application state around the given repository.
    pub fn new(repository: Arc<dyn LogRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new application state reading logs from `log_dir`.
    #[must_use]
    pub fn with_log_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self::new(DirectoryLogRepository::new_shared(log_dir))
    }

    /// Returns the log repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn LogRepository> {
        &self.repository
    }
}
