//! CLI command implementations.

pub mod apps;
pub mod configs;
pub mod jobs;
pub mod saved_searches;

use anyhow::{Context, Result};
use splunk_sdk::Service;
use splunk_sdk_config::Config;
use tokio_util::sync::CancellationToken;

use crate::args::Commands;
use crate::formatters::OutputFormat;

/// Connect and authenticate with `config`.
pub async fn connect(config: &Config, cancel: &CancellationToken) -> Result<Service> {
    Service::from_config(config, cancel)
        .await
        .with_context(|| format!("Failed to connect to {}", config.connection.base_url))
}

/// Run one subcommand and return what it prints.
pub async fn run(
    service: &Service,
    command: Commands,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<String> {
    match command {
        Commands::Apps { command } => apps::run(service, command, format, cancel).await,
        Commands::Configs { command } => configs::run(service, command, format, cancel).await,
        Commands::SavedSearches { command } => {
            saved_searches::run(service, command, format, cancel).await
        }
        Commands::Jobs { command } => jobs::run(service, command, format, cancel).await,
    }
}
