//! App endpoints (`apps/local`).

use tokio_util::sync::CancellationToken;

use crate::endpoints::{CollectionEndpoint, EntityEndpoint, ResourceKind};
use crate::entity::Entity;
use crate::error::{ClientError, Result};
use crate::models::{
    Application, ApplicationArchiveInfo, ApplicationAttributes, ApplicationSetupInfo,
    ApplicationUpdateInfo,
};

/// Installed apps.
pub const APPLICATIONS: ResourceKind<Application> = ResourceKind::new(&["apps", "local"]);

impl CollectionEndpoint<Application> {
    /// Create an app `name` from one of the server's templates, such as
    /// `barebones` or `sample_app`.
    pub async fn create_from_template(
        &self,
        name: &str,
        template: &str,
        attributes: &ApplicationAttributes,
        cancel: &CancellationToken,
    ) -> Result<Entity<Application>> {
        if name.is_empty() || template.is_empty() {
            return Err(ClientError::InvalidArgument(
                "app name and template must not be empty".to_string(),
            ));
        }
        let mut form = Vec::new();
        crate::form_params! { form =>
            "name" => required name,
            "template" => required template,
        }
        form.extend(attributes.to_args());
        self.create_with(&form, Some(name), cancel).await
    }

    /// Install an app from an archive at `path` on the server (or a URL).
    ///
    /// `name` overrides the app name taken from the archive. With `update`
    /// an existing app of the same name is upgraded in place.
    pub async fn install(
        &self,
        path: &str,
        name: Option<&str>,
        update: bool,
        cancel: &CancellationToken,
    ) -> Result<Entity<Application>> {
        if path.is_empty() {
            return Err(ClientError::InvalidArgument(
                "app archive path must not be empty".to_string(),
            ));
        }
        let mut form = Vec::new();
        crate::form_params! { form =>
            "explicit_appname" => name,
            "filename" => required true,
            "name" => required path,
            "update" => required update,
        }
        self.create_with(&form, name, cancel).await
    }
}

impl EntityEndpoint<Application> {
    /// The app's setup information.
    pub async fn setup_info(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Entity<ApplicationSetupInfo>> {
        self.get_at(&["setup"], cancel).await
    }

    /// Update availability reported by Splunkbase.
    pub async fn update_info(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Entity<ApplicationUpdateInfo>> {
        self.get_at(&["update"], cancel).await
    }

    /// Package the app into an archive on the server.
    pub async fn package(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Entity<ApplicationArchiveInfo>> {
        self.get_at(&["package"], cancel).await
    }

    /// Change the app's attributes.
    pub async fn update_attributes(
        &self,
        attributes: &ApplicationAttributes,
        check_for_updates: Option<bool>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut args = attributes.to_args();
        crate::form_params! { args =>
            "check_for_updates" => check_for_updates,
        }
        self.update(&args, cancel).await
    }
}
