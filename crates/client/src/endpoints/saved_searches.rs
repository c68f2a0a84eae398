//! Saved search endpoints (`saved/searches`).

use std::sync::Arc;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::endpoints::{CollectionEndpoint, EntityEndpoint, ResourceKind, jobs::JOBS};
use crate::entity::{Entity, EntityCollection};
use crate::error::{ClientError, Result};
use crate::models::{DispatchArgs, Job, SavedSearch};

/// Saved searches.
pub const SAVED_SEARCHES: ResourceKind<SavedSearch> = ResourceKind::new(&["saved", "searches"]);

impl CollectionEndpoint<SavedSearch> {
    /// Save `search` under `name`. `args` carry further attributes such as
    /// `description` or `cron_schedule`.
    pub async fn create_saved_search(
        &self,
        name: &str,
        search: &str,
        args: &[(String, String)],
        cancel: &CancellationToken,
    ) -> Result<Entity<SavedSearch>> {
        let mut form = vec![("search".to_string(), search.to_string())];
        form.extend_from_slice(args);
        self.create(name, &form, cancel).await
    }
}

impl EntityEndpoint<SavedSearch> {
    /// Run the saved search now and return the new job's sid.
    pub async fn dispatch(&self, args: &DispatchArgs, cancel: &CancellationToken) -> Result<String> {
        let feed = self
            .endpoint()
            .post(&["dispatch"], &args.to_args(), cancel)
            .await?
            .ensure_status(StatusCode::CREATED)
            .await?
            .feed()
            .await?;
        feed.response_value("sid")
            .map(str::to_string)
            .ok_or_else(|| {
                ClientError::MalformedResponse("dispatch response carries no sid".to_string())
            })
    }

    /// Jobs this saved search has run.
    pub async fn history(&self, cancel: &CancellationToken) -> Result<EntityCollection<Job>> {
        let feed = self
            .endpoint()
            .get(&["history"], &[], cancel)
            .await?
            .ensure_status(StatusCode::OK)
            .await?
            .feed()
            .await?;
        // History entries are titled by sid, so they address jobs directly.
        EntityCollection::from_feed(
            Arc::clone(self.endpoint().context()),
            self.endpoint().namespace().clone(),
            JOBS.path(),
            feed,
        )
    }
}
