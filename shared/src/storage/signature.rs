//! Directory listing and change signature.
//!
//! The signature is a cheap stat-based fingerprint of the watched directory:
//! one `(name, mtime, size)` tuple per log file, sorted by name. Comparing two
//! signatures is how the repository decides whether its cache is stale.

use super::log_repository::RepositoryError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Suffix a file name must carry to be treated as a log file.
pub const LOG_FILE_SUFFIX: &str = ".log";

/// Fingerprint of one log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFingerprint {
    /// File name without directory.
    pub name: String,
    /// Last modification time, if the platform reports one.
    pub modified: Option<SystemTime>,
    /// Size in bytes.
    pub size: u64,
}

/// Ordered fingerprints of every log file in a directory.
///
/// Two snapshots of the directory are considered the same iff their
/// signatures are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySignature {
    files: Vec<FileFingerprint>,
}

impl DirectorySignature {
    /// Returns the fingerprints in file-name order.
    #[must_use]
    pub fn files(&self) -> &[FileFingerprint] {
        &self.files
    }

    /// Returns the number of log files covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the directory held no log files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A log file found in the watched directory.
#[derive(Debug, Clone)]
pub(crate) struct LogFile {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) modified: Option<SystemTime>,
    pub(crate) size: u64,
}

/// Lists the regular `*.log` files directly inside `dir`, sorted by name.
///
/// A missing directory yields an empty list. Entries that are not regular
/// files (subdirectories, dangling symlinks, files removed while listing)
/// are ignored.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or a log file cannot
/// be stat'ed for any reason other than being gone.
pub(crate) fn list_log_files(dir: &Path) -> Result<Vec<LogFile>, RepositoryError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let read_dir = fs::read_dir(dir).map_err(|source| RepositoryError::io(dir, source))?;

    let mut files = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|source| RepositoryError::io(dir, source))?;
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(LOG_FILE_SUFFIX) {
            continue;
        }

        let path = dir_entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(RepositoryError::io(&path, e)),
        };
        if !metadata.is_file() {
            continue;
        }

        files.push(LogFile {
            name,
            path,
            modified: metadata.modified().ok(),
            size: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Computes the change signature of `dir`.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be listed.
pub fn compute_signature(dir: &Path) -> Result<DirectorySignature, RepositoryError> {
    let files = list_log_files(dir)?
        .into_iter()
        .map(|file| FileFingerprint {
            name: file.name,
            modified: file.modified,
            size: file.size,
        })
        .collect();

    Ok(DirectorySignature { files })
}
