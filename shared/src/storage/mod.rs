//! Log file discovery and caching.
//!
//! This module turns a directory of `*.log` files into parsed entries. The
//! `LogRepository` trait defines read access so callers can be handed any
//! implementation; `DirectoryLogRepository` is the file-backed one.

pub mod log_repository;
pub mod signature;

pub use log_repository::{DirectoryLogRepository, LogRepository, RepositoryError};
pub use signature::{compute_signature, DirectorySignature, FileFingerprint, LOG_FILE_SUFFIX};
