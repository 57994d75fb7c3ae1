//! Fanout - multi-target notification dispatcher
//!
//! Loads the configured targets, applies the CLI allowlist, dispatches one
//! message through the logging delegate, and exits non-zero when any target
//! failed.

use anyhow::{Context, Result};
use clap::Parser;
use fanout::{cli::Cli, config::Config, delivery::LoggingDeliverer, Provider};
use std::io::Read;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.display().to_string();
    let config = Config::load(&config_path, cli.clone())
        .with_context(|| format!("failed to load configuration from {config_path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!(targets = config.targets.len(), "fanout starting up");

    let message = match &cli.data {
        Some(data) => data.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read message from stdin")?;
            buf
        }
    };

    let provider = Provider::new(config.targets, &cli.id, Arc::new(LoggingDeliverer))?;
    if provider.targets().is_empty() {
        info!("no targets selected, nothing to dispatch");
    }

    if let Err(err) = provider.send(&message, &cli.format).await {
        error!(failed = err.len(), "{err}");
        std::process::exit(1);
    }

    Ok(())
}
