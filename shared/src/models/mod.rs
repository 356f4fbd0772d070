//! Data models for Logscope.
//!
//! This module contains the core data structures for parsed log records.

pub mod log;

pub use log::LogEntry;
