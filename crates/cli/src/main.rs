//! Splunk SDK CLI - browse and manage Splunk objects from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the configuration and connect through the shared SDK.
//! - Print results as a table or JSON.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` values feed clap's env defaults.
//! - Global options (like `--base-url`) are applied consistently across all subcommands.
//! - Ctrl+C cancels the in-flight request and exits with 130.

mod args;
mod cancellation;
mod commands;
mod error;
mod formatters;

use std::time::Duration;

use anyhow::Result;
use args::Cli;
use cancellation::{cancel_on_ctrl_c, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use splunk_sdk_config::{Config, ConfigLoader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(&cancel);

    let exit_code = match run(cli, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli, cancel: &CancellationToken) -> Result<()> {
    let config = build_config(&cli)?;
    let service = commands::connect(&config, cancel).await?;
    let output = commands::run(&service, cli.command, cli.output, cancel).await;

    // Session keys are released even when the command failed.
    if let Err(e) = service.log_off(&CancellationToken::new()).await {
        tracing::debug!(error = %e, "Failed to log off");
    }

    print!("{}", output?);
    Ok(())
}

/// Merge CLI flags over the environment. `SPLUNK_SKIP_VERIFY` has no flag
/// fallback, so the loader still reads the environment first.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(ref token) = cli.api_token {
        loader = loader.with_api_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(ref owner) = cli.owner {
        loader = loader.with_owner(owner.clone());
    }
    if let Some(ref app) = cli.app {
        loader = loader.with_app(app.clone());
    }

    Ok(loader.build()?)
}
