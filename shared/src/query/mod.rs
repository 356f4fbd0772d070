//! In-memory queries over parsed log entries.
//!
//! The repository hands out plain entry lists; everything here works on
//! slices of those lists and never touches the file system.

pub mod filter;
pub mod stats;

pub use filter::{filter_entries, paginate, LogFilter};
pub use stats::{stats, LogStats};
