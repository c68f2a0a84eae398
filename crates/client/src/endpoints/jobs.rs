//! Search job endpoints (`search/jobs`).
//!
//! A job's entry title is its search string, so jobs are named by the `sid`
//! content field.

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::endpoints::{CollectionEndpoint, EntityEndpoint, ResourceKind};
use crate::entity::EntryName;
use crate::error::{ClientError, Result};
use crate::models::{Job, JobArgs};

/// Search jobs.
pub const JOBS: ResourceKind<Job> =
    ResourceKind::new(&["search", "jobs"]).named_by(EntryName::Field("sid"));

impl CollectionEndpoint<Job> {
    /// Start a search job and return its sid.
    pub async fn create_job(
        &self,
        search: &str,
        args: &JobArgs,
        cancel: &CancellationToken,
    ) -> Result<String> {
        if search.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "search must not be empty".to_string(),
            ));
        }
        let mut form = vec![("search".to_string(), search.to_string())];
        form.extend(args.to_args());
        let feed = self
            .endpoint()
            .post(&[], &form, cancel)
            .await?
            .ensure_status(StatusCode::CREATED)
            .await?
            .feed()
            .await?;
        feed.response_value("sid")
            .map(str::to_string)
            .ok_or_else(|| ClientError::MalformedResponse("job response carries no sid".to_string()))
    }
}

impl EntityEndpoint<Job> {
    /// Stop the job and delete its results.
    pub async fn cancel(&self, cancel: &CancellationToken) -> Result<()> {
        self.control("cancel", cancel).await
    }

    pub async fn pause(&self, cancel: &CancellationToken) -> Result<()> {
        self.control("pause", cancel).await
    }

    pub async fn unpause(&self, cancel: &CancellationToken) -> Result<()> {
        self.control("unpause", cancel).await
    }

    /// Stop the job and keep the results gathered so far.
    pub async fn finalize(&self, cancel: &CancellationToken) -> Result<()> {
        self.control("finalize", cancel).await
    }

    async fn control(&self, action: &str, cancel: &CancellationToken) -> Result<()> {
        let args = [("action".to_string(), action.to_string())];
        self.action(&["control"], &args, cancel).await
    }
}
