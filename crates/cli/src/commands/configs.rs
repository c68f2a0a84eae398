//! Configs command implementation.
//!
//! Responsibilities:
//! - List configuration files, the stanzas of one file, and the settings of one stanza

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use splunk_sdk::Service;
use tokio_util::sync::CancellationToken;

use crate::formatters::{OutputFormat, Table, entities_json, to_json};

#[derive(Subcommand)]
pub enum ConfigsCommand {
    /// List configuration files
    Files,
    /// List the stanzas of a configuration file
    Stanzas {
        /// Configuration file name without `.conf` (e.g., 'props')
        #[arg(value_name = "FILE")]
        file: String,
    },
    /// Show the settings of one stanza
    Settings {
        #[arg(value_name = "FILE")]
        file: String,
        #[arg(value_name = "STANZA")]
        stanza: String,
    },
}

#[derive(Serialize)]
struct Setting<'a> {
    key: &'a str,
    value: &'a str,
}

pub async fn run(
    service: &Service,
    command: ConfigsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<String> {
    match command {
        ConfigsCommand::Files => {
            let files = service
                .configurations()
                .get_all(cancel)
                .await
                .context("Failed to list configuration files")?;
            let names: Vec<&str> = files.iter().map(|f| f.title()).collect();
            match format {
                OutputFormat::Json => to_json(&names),
                OutputFormat::Table => Ok(single_column("File", &names, "configuration files")),
            }
        }
        ConfigsCommand::Stanzas { file } => {
            let stanzas = service
                .configurations()
                .file(&file)
                .list(cancel)
                .await
                .with_context(|| format!("Failed to list stanzas of '{file}'"))?;
            match format {
                OutputFormat::Json => entities_json(stanzas.iter()),
                OutputFormat::Table => {
                    let names: Vec<&str> = stanzas.iter().map(|s| s.title()).collect();
                    Ok(single_column("Stanza", &names, "stanzas"))
                }
            }
        }
        ConfigsCommand::Settings { file, stanza } => {
            let settings = service
                .configurations()
                .file(&file)
                .stanza(&stanza)
                .settings(cancel)
                .await
                .with_context(|| format!("Failed to read stanza '{stanza}' of '{file}'"))?;
            let pairs: Vec<Setting<'_>> = settings
                .iter()
                .map(|s| Setting {
                    key: s.title(),
                    value: &s.content().value,
                })
                .collect();
            match format {
                OutputFormat::Json => to_json(&pairs),
                OutputFormat::Table => {
                    let mut table = Table::new(&["Key", "Value"]);
                    for pair in &pairs {
                        table.push([pair.key, pair.value]);
                    }
                    Ok(table.render("settings"))
                }
            }
        }
    }
}

fn single_column(header: &'static str, values: &[&str], noun: &str) -> String {
    let mut table = Table::new(&[header]);
    for value in values {
        table.push([*value]);
    }
    table.render(noun)
}
