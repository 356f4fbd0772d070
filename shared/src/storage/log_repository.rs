//! Log repository trait and the directory-backed implementation.
//!
//! Provides the `LogRepository` trait for read access to parsed log entries
//! and `DirectoryLogRepository`, which parses `*.log` files from one directory
//! and caches the result until the directory signature changes.

use super::signature::{self, DirectorySignature};
use crate::models::LogEntry;
use crate::parser::{parse_line, split_lines, ParseOutcome, SkipReason};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;

/// Errors that can occur while loading log entries.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A listed file or the directory itself could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to acquire a lock on the cache.
    #[error("Failed to acquire lock on log repository")]
    LockError,
}

impl RepositoryError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read access to parsed log entries.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait LogRepository: Send + Sync {
    /// Returns every entry, reloading first if the source changed or
    /// `refresh` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a log file cannot be read.
    fn entries(&self, refresh: bool) -> Result<Vec<LogEntry>, RepositoryError>;

    /// Looks up a single entry by id with the same refresh policy as
    /// [`LogRepository::entries`]. Returns `Ok(None)` for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns an error if a log file cannot be read.
    fn entry(&self, id: &str, refresh: bool) -> Result<Option<LogEntry>, RepositoryError>;
}

/// Entries parsed from the directory together with the signature they were
/// loaded under.
#[derive(Debug)]
struct Snapshot {
    entries: Vec<LogEntry>,
    signature: DirectorySignature,
}

/// Log repository backed by a directory of `*.log` files.
///
/// The parsed entries are cached as one immutable snapshot. Every read first
/// compares the directory signature against the cached one and reparses all
/// files when they differ. Refreshes are serialized, and the new snapshot is
/// swapped in whole, so readers never see a partially built list.
///
/// # Example
///
/// ```
/// use shared::storage::{DirectoryLogRepository, LogRepository};
///
/// let dir = std::env::temp_dir().join("logscope-doc-example-missing");
/// let repo = DirectoryLogRepository::new(&dir);
///
/// // A missing directory simply has no entries.
/// assert!(repo.entries(false).unwrap().is_empty());
/// assert!(repo.entry("0-1", false).unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct DirectoryLogRepository {
    log_dir: PathBuf,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    refresh_lock: Mutex<()>,
    files_read: AtomicU64,
}

impl DirectoryLogRepository {
    /// Creates a repository watching `log_dir`. Nothing is read until the
    /// first query.
    #[must_use]
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            files_read: AtomicU64::new(0),
        }
    }

    /// Creates a new repository wrapped in an Arc.
    #[must_use]
    pub fn new_shared(log_dir: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self::new(log_dir))
    }

    /// Returns the watched directory.
    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Returns how many log files have been opened for parsing so far.
    #[must_use]
    pub fn files_read(&self) -> u64 {
        self.files_read.load(Ordering::Relaxed)
    }

    /// Computes the current signature of the watched directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn compute_signature(&self) -> Result<DirectorySignature, RepositoryError> {
        signature::compute_signature(&self.log_dir)
    }

    /// Parses every log file in the directory, bypassing the cache.
    ///
    /// Files are visited in name order; the position of a file in that order
    /// is the file index used in entry ids. Malformed lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a listed file cannot be read. One unreadable file
    /// fails the whole load.
    pub fn load_snapshot(&self) -> Result<Vec<LogEntry>, RepositoryError> {
        let mut entries = Vec::new();

        for (file_index, file) in signature::list_log_files(&self.log_dir)?
            .into_iter()
            .enumerate()
        {
            let bytes = fs::read(&file.path).map_err(|source| {
                tracing::error!(path = %file.path.display(), error = %source, "Failed to read log file");
                RepositoryError::io(&file.path, source)
            })?;
            self.files_read.fetch_add(1, Ordering::Relaxed);

            let text = String::from_utf8_lossy(&bytes);
            let mut skipped = 0usize;

            for (index, raw_line) in split_lines(&text).enumerate() {
                match parse_line(raw_line, file_index, index + 1, &file.name) {
                    ParseOutcome::Parsed(entry) => entries.push(entry),
                    ParseOutcome::Skipped(SkipReason::Blank) => {}
                    ParseOutcome::Skipped(_) => skipped += 1,
                }
            }

            if skipped > 0 {
                tracing::debug!(file = %file.name, skipped, "Skipped malformed log lines");
            }
        }

        Ok(entries)
    }

    /// Returns the cached snapshot if it was loaded under `signature`.
    fn cached(
        &self,
        signature: &DirectorySignature,
    ) -> Result<Option<Arc<Snapshot>>, RepositoryError> {
        let cached = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::LockError)?;

        Ok(cached
            .as_ref()
            .filter(|snapshot| snapshot.signature == *signature)
            .map(Arc::clone))
    }

    /// Returns the current snapshot, reloading it if needed.
    ///
    /// Cache hits only take the read lock. Reloads run under `refresh_lock`
    /// and check the cache again, so concurrent readers that all saw a stale
    /// snapshot parse the directory once.
    fn current_snapshot(&self, force: bool) -> Result<Arc<Snapshot>, RepositoryError> {
        if !force {
            let signature = self.compute_signature()?;
            if let Some(snapshot) = self.cached(&signature)? {
                tracing::debug!(files = signature.len(), "Log snapshot is current");
                return Ok(snapshot);
            }
        }

        let _guard = self
            .refresh_lock
            .lock()
            .map_err(|_| RepositoryError::LockError)?;

        let signature = self.compute_signature()?;

        if !force {
            if let Some(snapshot) = self.cached(&signature)? {
                return Ok(snapshot);
            }
        }

        let entries = self.load_snapshot()?;
        tracing::info!(
            log_dir = %self.log_dir.display(),
            files = signature.len(),
            entries = entries.len(),
            forced = force,
            "Reloaded log snapshot"
        );

        let snapshot = Arc::new(Snapshot { entries, signature });
        let mut slot = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::LockError)?;
        *slot = Some(Arc::clone(&snapshot));

        Ok(snapshot)
    }
}

impl LogRepository for DirectoryLogRepository {
    fn entries(&self, refresh: bool) -> Result<Vec<LogEntry>, RepositoryError> {
        let snapshot = self.current_snapshot(refresh)?;
        Ok(snapshot.entries.clone())
    }

    fn entry(&self, id: &str, refresh: bool) -> Result<Option<LogEntry>, RepositoryError> {
        let snapshot = self.current_snapshot(refresh)?;
        Ok(snapshot.entries.iter().find(|entry| entry.id == id).cloned())
    }
}
