//! Logscope API Server Binary
//!
//! Entry point for the Logscope log query server.

#![deny(unsafe_code)]

use anyhow::Result;
use api::{Config, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let builder = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    );
    match config.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    api::run_server_with_config(config).await
}
