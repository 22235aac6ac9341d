//! `firebase-provision [PROJECT_ID]`: provision, build and deploy.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::provision::{self as service, ProvisionOptions};
use crate::domain::ProjectId;
use crate::output::json;

/// Arguments for the provision command.
#[derive(Debug, Default)]
pub struct ProvisionArgs {
    /// Project ID from the command line; the configured default when `None`.
    pub project_id: Option<String>,
    /// Skip `npm install`, `npm run build` and `firebase deploy`.
    pub skip_deploy: bool,
}

/// Run the provisioning pipeline and print the completion report.
///
/// The project ID is validated before any external command runs.
///
/// # Errors
///
/// Returns an error if the project ID is invalid or any step fails.
pub async fn run(args: &ProvisionArgs, app: &AppContext) -> Result<()> {
    let raw = args
        .project_id
        .as_deref()
        .unwrap_or(&app.config.default_project_id);
    let project = ProjectId::parse(raw)?;

    let reporter = app.terminal_reporter();
    let report = service::provision(
        &app.firebase,
        &app.gcloud,
        &app.npm,
        &app.tools,
        &app.workspace,
        ProvisionOptions {
            reporter: &reporter,
            project,
            config: &app.config,
            skip_deploy: args.skip_deploy,
        },
    )
    .await?;

    if app.is_json() {
        println!("{}", json::format_report(&report)?);
    } else {
        app.human().render_report(&report);
    }
    Ok(())
}
