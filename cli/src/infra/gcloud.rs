//! Infrastructure adapter for the `gcloud` CLI.
//!
//! Covers active-context configuration, service-account keys and Firestore.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::application::ports::{CloudContext, CommandRunner, CredentialIssuer, DatabaseAdmin};
use crate::domain::ProjectId;
use crate::domain::firebase::admin_account_email;
use crate::infra::command_runner::ensure_success;

const GCLOUD: &str = "gcloud";

/// Enabling an API and creating a database routinely take minutes.
const SLOW_OPERATION_TIMEOUT: Duration = Duration::from_secs(600);

/// Google Cloud CLI adapter.
pub struct GcloudCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> GcloudCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn checked(&self, args: &[&str], what: &str) -> Result<std::process::Output> {
        let output = self.runner.run(GCLOUD, args).await.context(what.to_string())?;
        ensure_success(output, what)
    }
}

impl<R: CommandRunner> CloudContext for GcloudCli<R> {
    async fn confirm_access(&self, project: &ProjectId) -> Result<bool> {
        let output = self
            .runner
            .run(
                GCLOUD,
                &["projects", "describe", project.as_str(), "--format", "value(projectId)"],
            )
            .await
            .context("gcloud projects describe")?;
        Ok(output.status.success())
    }

    async fn set_active_project(&self, project: &ProjectId) -> Result<()> {
        self.checked(
            &["config", "set", "project", project.as_str()],
            "gcloud config set project",
        )
        .await
        .map(drop)
    }

    async fn set_quota_project(&self, project: &ProjectId) -> Result<()> {
        self.checked(
            &["auth", "application-default", "set-quota-project", project.as_str()],
            "gcloud auth application-default set-quota-project",
        )
        .await
        .map(drop)
    }
}

impl<R: CommandRunner> CredentialIssuer for GcloudCli<R> {
    async fn find_admin_account(&self, project: &ProjectId, label: &str) -> Result<Option<String>> {
        let filter = format!("displayName:{label}");
        let output = self
            .checked(
                &[
                    "iam",
                    "service-accounts",
                    "list",
                    "--project",
                    project.as_str(),
                    "--filter",
                    &filter,
                    "--format",
                    "json",
                ],
                "gcloud iam service-accounts list",
            )
            .await?;
        let email = admin_account_email(&String::from_utf8_lossy(&output.stdout), label)?;
        debug!(?email, "admin service account lookup");
        Ok(email)
    }

    async fn create_key(&self, project: &ProjectId, account: &str, dest: &Path) -> Result<()> {
        let dest = dest
            .to_str()
            .with_context(|| format!("key path {} is not valid UTF-8", dest.display()))?;
        self.checked(
            &[
                "iam",
                "service-accounts",
                "keys",
                "create",
                dest,
                "--iam-account",
                account,
                "--project",
                project.as_str(),
            ],
            "gcloud iam service-accounts keys create",
        )
        .await?;
        info!(account, path = dest, "created service-account key");
        Ok(())
    }
}

impl<R: CommandRunner> DatabaseAdmin for GcloudCli<R> {
    async fn database_exists(&self, project: &ProjectId) -> Result<bool> {
        let output = self
            .runner
            .run(
                GCLOUD,
                &[
                    "firestore",
                    "databases",
                    "describe",
                    "--database=(default)",
                    "--project",
                    project.as_str(),
                ],
            )
            .await
            .context("gcloud firestore databases describe")?;
        Ok(output.status.success())
    }

    async fn enable_database_service(&self, project: &ProjectId) -> Result<()> {
        let output = self
            .runner
            .run_with_timeout(
                GCLOUD,
                &["services", "enable", "firestore.googleapis.com", "--project", project.as_str()],
                SLOW_OPERATION_TIMEOUT,
            )
            .await
            .context("gcloud services enable")?;
        ensure_success(output, "gcloud services enable firestore.googleapis.com").map(drop)
    }

    async fn create_database(&self, project: &ProjectId, location: &str) -> Result<()> {
        let location = format!("--location={location}");
        let output = self
            .runner
            .run_with_timeout(
                GCLOUD,
                &["firestore", "databases", "create", &location, "--project", project.as_str()],
                SLOW_OPERATION_TIMEOUT,
            )
            .await
            .context("gcloud firestore databases create")?;
        ensure_success(output, "gcloud firestore databases create").map(drop)
    }
}
