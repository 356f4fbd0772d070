//! Logscope Shared Library
//!
//! This crate contains the core of Logscope: parsing tab-delimited log
//! files, caching the parsed entries, and querying them.
//!
//! # Modules
//!
//! - [`models`] - The `LogEntry` data model
//! - [`parser`] - Line and timestamp parsing
//! - [`storage`] - Directory signature and the cached log repository
//! - [`query`] - Filtering, pagination and statistics
//!
//! # Example
//!
//! ```
//! use shared::parser::parse_line;
//! use shared::query::{filter_entries, stats, LogFilter};
//!
//! let entry = parse_line("2024-01-01 10:00:00\tERROR\tauth\tfailed login", 0, 1, "app.log")
//!     .into_entry()
//!     .unwrap();
//!
//! let errors = filter_entries(&[entry], &LogFilter::new().with_level("error"));
//! assert_eq!(errors.len(), 1);
//! assert_eq!(stats(&errors).by_component["auth"], 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod parser;
pub mod query;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
