//! Jobs command implementation.
//!
//! Responsibilities:
//! - List search jobs with their state and progress
//! - Cancel a job by sid

use anyhow::{Context, Result};
use clap::Subcommand;
use splunk_sdk::Service;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::formatters::{OutputFormat, Table, entities_json, or_missing};

#[derive(Subcommand)]
pub enum JobsCommand {
    /// List search jobs
    List,
    /// Cancel a search job
    Cancel {
        /// Search job id
        #[arg(value_name = "SID")]
        sid: String,
    },
}

pub async fn run(
    service: &Service,
    command: JobsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<String> {
    match command {
        JobsCommand::List => {
            let jobs = service
                .jobs()
                .get_all(cancel)
                .await
                .context("Failed to list search jobs")?;
            match format {
                OutputFormat::Json => entities_json(jobs.iter()),
                OutputFormat::Table => {
                    let mut table = Table::new(&["SID", "State", "Progress", "Events", "Search"]);
                    for job in jobs.iter() {
                        let content = job.content();
                        table.push([
                            content.sid.clone(),
                            or_missing(content.dispatch_state.as_ref()),
                            or_missing(content.done_progress.map(|p| format!("{:.0}%", p * 100.0))),
                            or_missing(content.event_count),
                            job.title().to_string(),
                        ]);
                    }
                    Ok(table.render("jobs"))
                }
            }
        }
        JobsCommand::Cancel { sid } => {
            info!("Cancelling search job: {}", sid);
            service
                .jobs()
                .entity(&sid)
                .cancel(cancel)
                .await
                .with_context(|| format!("Failed to cancel job '{sid}'"))?;
            Ok(format!("Job '{sid}' cancelled.\n"))
        }
    }
}
