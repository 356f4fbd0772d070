//! Logscope CLI
//!
//! Command-line interface for querying a directory of log files without
//! running the server.
//!
//! # Usage
//!
//! ```bash
//! logscope --help
//! logscope --log-dir /var/log/app list --level error --limit 20
//! logscope show 0-42
//! logscope stats
//! ```

#![deny(unsafe_code)]

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::parser::parse_timestamp;
use shared::query::{filter_entries, paginate, stats, LogFilter};
use shared::storage::{DirectoryLogRepository, LogRepository};
use std::io::Write;
use std::path::PathBuf;

/// Logscope CLI - query tab-delimited log files
#[derive(Parser)]
#[command(name = "logscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the *.log files
    #[arg(short, long, env = "LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List entries, optionally filtered and paginated
    List {
        /// Level to match (case-insensitive)
        #[arg(long)]
        level: Option<String>,

        /// Component to match (case-insensitive)
        #[arg(long)]
        component: Option<String>,

        /// Earliest timestamp, "YYYY-MM-DD HH:MM:SS"
        #[arg(long)]
        start_time: Option<String>,

        /// Latest timestamp, "YYYY-MM-DD HH:MM:SS"
        #[arg(long)]
        end_time: Option<String>,

        /// Number of matching entries to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of entries to print
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..=10_000))]
        limit: u64,
    },
    /// Show a single entry by id
    Show {
        /// Entry id, e.g. 0-12
        id: String,
    },
    /// Print counts by level and component
    Stats,
}

/// Tracing filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn build_filter(
    level: Option<String>,
    component: Option<String>,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<LogFilter> {
    let mut filter = LogFilter::new();
    if let Some(level) = level {
        filter = filter.with_level(level);
    }
    if let Some(component) = component {
        filter = filter.with_component(component);
    }
    if let Some(start) = start_time {
        filter = filter.with_start_time(parse_timestamp(start)?);
    }
    if let Some(end) = end_time {
        filter = filter.with_end_time(parse_timestamp(end)?);
    }
    Ok(filter)
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let Some(command) = cli.command else {
        writeln!(out, "Logscope CLI v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Use --help for usage information")?;
        return Ok(());
    };

    let repository = DirectoryLogRepository::new(&cli.log_dir);
    tracing::debug!(log_dir = %cli.log_dir.display(), "Reading log directory");

    match command {
        Commands::List {
            level,
            component,
            start_time,
            end_time,
            offset,
            limit,
        } => {
            let filter = build_filter(
                level,
                component,
                start_time.as_deref(),
                end_time.as_deref(),
            )?;
            let entries = repository.entries(false)?;
            let matched = filter_entries(&entries, &filter);
            let limit = usize::try_from(limit)?;
            print_json(out, &paginate(matched, offset, limit))
        }
        Commands::Show { id } => {
            let entry = repository
                .entry(&id, false)?
                .ok_or_else(|| anyhow!("Log with id {id} not found"))?;
            print_json(out, &entry)
        }
        Commands::Stats => {
            let entries = repository.entries(false)?;
            print_json(out, &stats(&entries))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli, &mut std::io::stdout().lock())
}
