//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse global connection options with environment fallbacks.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not validate configuration (see `splunk_sdk_config::ConfigLoader`).

use clap::{Parser, Subcommand};

use crate::commands;
use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "splunk-sdk-cli")]
#[command(about = "Browse and manage Splunk objects over the REST API", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  splunk-sdk-cli apps list\n  splunk-sdk-cli --app search saved-searches list\n  splunk-sdk-cli configs settings props default\n  splunk-sdk-cli jobs cancel 1709590386.42\n"
)]
pub struct Cli {
    /// Base URL of the management endpoint (e.g., https://localhost:8089)
    #[arg(short, long, global = true, env = "SPLUNK_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for session authentication
    #[arg(short, long, global = true, env = "SPLUNK_USERNAME")]
    pub username: Option<String>,

    /// Password for session authentication
    #[arg(short, long, global = true, env = "SPLUNK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API token for authentication (preferred over username/password)
    #[arg(short, long, global = true, env = "SPLUNK_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SPLUNK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Namespace owner; `-` matches any owner
    #[arg(long, global = true, env = "SPLUNK_OWNER")]
    pub owner: Option<String>,

    /// Namespace app; `-` matches any app
    #[arg(long, global = true, env = "SPLUNK_APP")]
    pub app: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List and manage installed apps
    Apps {
        #[command(subcommand)]
        command: commands::apps::AppsCommand,
    },

    /// Browse configuration files, stanzas and settings
    Configs {
        #[command(subcommand)]
        command: commands::configs::ConfigsCommand,
    },

    /// List and dispatch saved searches
    SavedSearches {
        #[command(subcommand)]
        command: commands::saved_searches::SavedSearchesCommand,
    },

    /// List and control search jobs
    Jobs {
        #[command(subcommand)]
        command: commands::jobs::JobsCommand,
    },
}
