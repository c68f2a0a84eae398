//! Apps command implementation.
//!
//! Responsibilities:
//! - List installed apps, walking every page of the collection
//! - Show detailed information about specific apps
//! - Enable/disable apps by name
//!
//! Invariants:
//! - App names are passed through without modification

use anyhow::{Context, Result};
use clap::Subcommand;
use splunk_sdk::Service;
use splunk_sdk::models::Application;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::formatters::{OutputFormat, Table, entities_json, or_missing};

/// Apps fetched per request while walking the collection.
const DEFAULT_PAGE_SIZE: usize = 30;

#[derive(Subcommand)]
pub enum AppsCommand {
    /// List installed apps
    List {
        /// Number of apps requested per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Show detailed information about an app
    Info {
        /// App name (e.g., 'search', 'launcher')
        #[arg(value_name = "APP_NAME")]
        app_name: String,
    },
    /// Enable an app by name
    Enable {
        #[arg(value_name = "APP_NAME")]
        app_name: String,
    },
    /// Disable an app by name
    Disable {
        #[arg(value_name = "APP_NAME")]
        app_name: String,
    },
}

pub async fn run(
    service: &Service,
    command: AppsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<String> {
    match command {
        AppsCommand::List { page_size } => run_list(service, page_size, format, cancel).await,
        AppsCommand::Info { app_name } => run_info(service, &app_name, format, cancel).await,
        AppsCommand::Enable { app_name } => {
            info!("Enabling app: {}", app_name);
            service
                .applications()
                .entity(&app_name)
                .enable(cancel)
                .await
                .with_context(|| format!("Failed to enable app '{app_name}'"))?;
            Ok(format!("App '{app_name}' enabled.\n"))
        }
        AppsCommand::Disable { app_name } => {
            info!("Disabling app: {}", app_name);
            service
                .applications()
                .entity(&app_name)
                .disable(cancel)
                .await
                .with_context(|| format!("Failed to disable app '{app_name}'"))?;
            Ok(format!("App '{app_name}' disabled.\n"))
        }
    }
}

async fn run_list(
    service: &Service,
    page_size: usize,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<String> {
    let apps = service.applications();
    let mut entities = Vec::new();
    let mut offset = 0;

    loop {
        let page = apps
            .get_slice(offset, page_size, &[], cancel)
            .await
            .context("Failed to list apps")?;
        let next = page.pagination().next_offset();
        info!(offset, fetched = page.len(), "Fetched apps page");
        entities.extend(page.into_entities());
        match next {
            Some(next) => offset = next,
            None => break,
        }
    }

    match format {
        OutputFormat::Json => entities_json(&entities),
        OutputFormat::Table => {
            let mut table = Table::new(&["Name", "Label", "Version", "Disabled"]);
            for app in &entities {
                let content = app.content();
                table.push([
                    app.title().to_string(),
                    or_missing(content.label.as_ref()),
                    or_missing(content.version.as_ref()),
                    content.disabled.to_string(),
                ]);
            }
            Ok(table.render("apps"))
        }
    }
}

async fn run_info(
    service: &Service,
    app_name: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<String> {
    let app = service
        .applications()
        .entity(app_name)
        .get(cancel)
        .await
        .with_context(|| format!("Failed to get app '{app_name}'"))?;

    match format {
        OutputFormat::Json => entities_json([&app]),
        OutputFormat::Table => Ok(describe(app.title(), app.content())),
    }
}

fn describe(name: &str, app: &Application) -> String {
    let fields = [
        ("Name", name.to_string()),
        ("Label", or_missing(app.label.as_ref())),
        ("Version", or_missing(app.version.as_ref())),
        ("Author", or_missing(app.author.as_ref())),
        ("Description", or_missing(app.description.as_ref())),
        ("Disabled", app.disabled.to_string()),
        ("Visible", or_missing(app.visible)),
        ("Configured", or_missing(app.configured)),
    ];
    fields
        .iter()
        .map(|(label, value)| format!("{label}: {value}\n"))
        .collect()
}
