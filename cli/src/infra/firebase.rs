//! Infrastructure adapter for the `firebase` CLI.
//!
//! `FirebaseCli<R>` routes all `firebase` calls through a `CommandRunner` and
//! implements the project, app-registry and deploy ports.

use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::application::ports::{
    AppRegistry, CommandRunner, Deployer, ProjectManager, WebAppCreation,
};
use crate::domain::ProjectId;
use crate::domain::firebase::{created_app_id, first_web_app_id};
use crate::infra::command_runner::{ensure_status, ensure_success};

const FIREBASE: &str = "firebase";

/// Project creation provisions a GCP project and routinely takes minutes.
const PROJECT_CREATE_TIMEOUT: Duration = Duration::from_secs(600);

/// Firebase CLI adapter.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct FirebaseCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> FirebaseCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ProjectManager for FirebaseCli<R> {
    /// `Ok(false)` whenever creation did not succeed, including a spawn
    /// failure or timeout; the caller's access check decides what happens next.
    async fn create_project(&self, project: &ProjectId, display_name: &str) -> Result<bool> {
        let result = self
            .runner
            .run_with_timeout(
                FIREBASE,
                &[
                    "projects:create",
                    project.as_str(),
                    "--display-name",
                    display_name,
                ],
                PROJECT_CREATE_TIMEOUT,
            )
            .await;
        match result {
            Ok(output) if output.status.success() => Ok(true),
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(project = %project, stderr = stderr.trim(), "firebase projects:create failed");
                Ok(false)
            }
            Err(e) => {
                warn!(project = %project, error = %e, "firebase projects:create did not complete");
                Ok(false)
            }
        }
    }
}

impl<R: CommandRunner> AppRegistry for FirebaseCli<R> {
    async fn find_web_app(&self, project: &ProjectId) -> Result<Option<String>> {
        let output = self
            .runner
            .run(FIREBASE, &["apps:list", "--project", project.as_str(), "--json"])
            .await
            .context("firebase apps:list")?;
        let output = ensure_success(output, "firebase apps:list")?;
        first_web_app_id(&String::from_utf8_lossy(&output.stdout))
    }

    async fn create_web_app(
        &self,
        project: &ProjectId,
        display_name: &str,
    ) -> Result<WebAppCreation> {
        let output = self
            .runner
            .run(
                FIREBASE,
                &[
                    "apps:create",
                    "WEB",
                    display_name,
                    "--project",
                    project.as_str(),
                    "--json",
                ],
            )
            .await
            .context("firebase apps:create")?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let app_id = created_app_id(&stdout);
        debug!(?app_id, status = %output.status, "firebase apps:create returned");
        Ok(WebAppCreation {
            app_id,
            raw: combined(&output),
        })
    }

    async fn sdk_config(&self, project: &ProjectId, app_id: &str) -> Result<String> {
        let output = self
            .runner
            .run(
                FIREBASE,
                &["apps:sdkconfig", "WEB", app_id, "--project", project.as_str()],
            )
            .await
            .context("firebase apps:sdkconfig")?;
        let output = ensure_success(output, "firebase apps:sdkconfig")?;
        String::from_utf8(output.stdout).context("firebase apps:sdkconfig printed non-UTF-8 output")
    }
}

impl<R: CommandRunner> Deployer for FirebaseCli<R> {
    async fn deploy(&self, project: &ProjectId) -> Result<()> {
        let status = self
            .runner
            .run_status(FIREBASE, &["deploy", "--project", project.as_str()])
            .await
            .context("firebase deploy")?;
        ensure_status(status, "firebase deploy")
    }
}

/// Stdout and stderr joined, for diagnostic dumps.
fn combined(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
        (_, true) => stdout.into_owned(),
        (true, false) => stderr.into_owned(),
        (false, false) => format!("{stdout}\n{stderr}"),
    }
}
