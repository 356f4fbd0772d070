//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Output format for the server's own diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name (`text` or `json`, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error for any other value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("Unknown log format '{other}', expected 'text' or 'json'"),
        }
    }
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `LOGSCOPE_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `LOGSCOPE_PORT`: The port to listen on (default: 8080)
/// - `LOG_DIR`: Directory holding the `*.log` files to serve (default: "logs")
/// - `LOGSCOPE_LOG_FORMAT`: `text` or `json` diagnostics (default: "text")
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// The watched log directory.
    pub log_dir: PathBuf,
    /// Format of the server's tracing output.
    pub log_format: LogFormat,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `LOGSCOPE_PORT` is set but cannot be parsed as a valid port number
    /// - `LOGSCOPE_LOG_FORMAT` is set to an unknown format
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("LOGSCOPE_HOST").unwrap_or(defaults.host);

        let port = std::env::var("LOGSCOPE_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()?
            .unwrap_or(defaults.port);

        let log_dir = std::env::var_os("LOG_DIR").map_or(defaults.log_dir, PathBuf::from);

        let log_format = std::env::var("LOGSCOPE_LOG_FORMAT")
            .ok()
            .map(|f| LogFormat::parse(&f))
            .transpose()?
            .unwrap_or(defaults.log_format);

        Ok(Self {
            host,
            port,
            log_dir,
            log_format,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port combination is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse::<SocketAddr>()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_dir: PathBuf::from("logs"),
            log_format: LogFormat::Text,
        }
    }
}
