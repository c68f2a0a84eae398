//! Saved searches command implementation.
//!
//! Responsibilities:
//! - List saved searches in the configured namespace
//! - Dispatch a saved search and print the new job's sid

use anyhow::{Context, Result};
use clap::Subcommand;
use splunk_sdk::Service;
use splunk_sdk::models::DispatchArgs;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::formatters::{OutputFormat, Table, entities_json, or_missing, to_json};

#[derive(Subcommand)]
pub enum SavedSearchesCommand {
    /// List saved searches
    List,
    /// Dispatch a saved search now
    Dispatch {
        /// Saved search name
        #[arg(value_name = "NAME")]
        name: String,

        /// Override the dispatch earliest time (e.g., '-24h')
        #[arg(short, long, allow_hyphen_values = true)]
        earliest: Option<String>,

        /// Override the dispatch latest time (e.g., 'now')
        #[arg(short, long, allow_hyphen_values = true)]
        latest: Option<String>,

        /// Run the saved search's alert actions
        #[arg(long)]
        trigger_actions: bool,
    },
}

pub async fn run(
    service: &Service,
    command: SavedSearchesCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<String> {
    match command {
        SavedSearchesCommand::List => {
            let searches = service
                .saved_searches()
                .get_all(cancel)
                .await
                .context("Failed to list saved searches")?;
            match format {
                OutputFormat::Json => entities_json(searches.iter()),
                OutputFormat::Table => {
                    let mut table = Table::new(&["Name", "Owner", "App", "Scheduled", "Search"]);
                    for search in searches.iter() {
                        let content = search.content();
                        let acl = search.acl();
                        table.push([
                            search.title().to_string(),
                            or_missing(acl.map(|a| &a.owner)),
                            or_missing(acl.map(|a| &a.app)),
                            or_missing(content.is_scheduled),
                            content.search.clone(),
                        ]);
                    }
                    Ok(table.render("saved searches"))
                }
            }
        }
        SavedSearchesCommand::Dispatch {
            name,
            earliest,
            latest,
            trigger_actions,
        } => {
            let args = DispatchArgs {
                earliest_time: earliest,
                latest_time: latest,
                trigger_actions: trigger_actions.then_some(true),
                ..Default::default()
            };
            info!("Dispatching saved search: {}", name);
            let sid = service
                .saved_searches()
                .entity(&name)
                .dispatch(&args, cancel)
                .await
                .with_context(|| format!("Failed to dispatch saved search '{name}'"))?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({ "sid": sid })),
                OutputFormat::Table => Ok(format!("{sid}\n")),
            }
        }
    }
}
