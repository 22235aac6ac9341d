//! Application service: provision a Firebase backend and hosting site.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Steps run strictly in
//! order and the first failure ends the run; resources created by earlier
//! steps are left in place.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::application::ports::{
    AppRegistry, CloudContext, CredentialIssuer, DatabaseAdmin, Deployer, ProgressReporter,
    ProjectManager, SiteBuilder, ToolProbe, Workspace,
};
use crate::domain::firebase::{
    self as files, ENV_FILE, FIREBASE_JSON_FILE, FIREBASERC_FILE, FIRESTORE_INDEXES_FILE, SDK_CONFIG_FILE,
    WEBAPP_CREATE_DUMP_FILE,
};
use crate::domain::{ProjectId, ProvisionConfig, ProvisionError, extract_sdk_config, render_env_file};

/// Tools every run needs.
const PROVIDER_TOOLS: &[&str] = &["firebase", "gcloud"];
/// Needed only when building and deploying.
const BUILD_TOOL: &str = "npm";

/// Inputs to `provision`.
pub struct ProvisionOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub project: ProjectId,
    pub config: &'a ProvisionConfig,
    /// Stop after writing hosting configuration.
    pub skip_deploy: bool,
}

/// State threaded through every step, recording what each step resolved.
#[derive(Debug)]
pub struct ProvisionContext {
    pub project: ProjectId,
    /// `Some(true)` when this run created the project.
    pub project_created: Option<bool>,
    pub web_app_id: Option<String>,
    pub web_app_created: bool,
    pub admin_account: Option<String>,
    pub credential_reused: bool,
    pub database_created: bool,
    pub deployed: bool,
    pub env_file: PathBuf,
    pub credential_file: PathBuf,
    pub written: Vec<PathBuf>,
}

impl ProvisionContext {
    fn new(project: ProjectId, workspace: &impl Workspace, config: &ProvisionConfig) -> Self {
        Self {
            project,
            project_created: None,
            web_app_id: None,
            web_app_created: false,
            admin_account: None,
            credential_reused: false,
            database_created: false,
            deployed: false,
            env_file: workspace.resolve(Path::new(ENV_FILE)),
            credential_file: workspace.resolve(&config.credential_path),
            written: Vec::new(),
        }
    }

    fn record_write(&mut self, workspace: &impl Workspace, name: &str, content: &str) -> Result<()> {
        let path = workspace.resolve(Path::new(name));
        workspace.write(&path, content)?;
        self.written.push(path);
        Ok(())
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub project_id: ProjectId,
    pub hosting_url: String,
    pub project_created: bool,
    pub web_app_id: String,
    pub web_app_created: bool,
    pub admin_account: String,
    pub credential_reused: bool,
    pub database_created: bool,
    pub deployed: bool,
    pub env_file: PathBuf,
    pub credential_file: PathBuf,
    pub files_written: Vec<PathBuf>,
}

impl TryFrom<ProvisionContext> for ProvisionReport {
    type Error = anyhow::Error;

    fn try_from(ctx: ProvisionContext) -> Result<Self> {
        Ok(Self {
            hosting_url: ctx.project.hosting_url(),
            project_created: ctx.project_created.unwrap_or(false),
            web_app_id: ctx.web_app_id.context("web app was never resolved")?,
            admin_account: ctx.admin_account.context("admin account was never resolved")?,
            project_id: ctx.project,
            web_app_created: ctx.web_app_created,
            credential_reused: ctx.credential_reused,
            database_created: ctx.database_created,
            deployed: ctx.deployed,
            env_file: ctx.env_file,
            credential_file: ctx.credential_file,
            files_written: ctx.written,
        })
    }
}

/// Run the whole provisioning pipeline against `opts.project`.
///
/// Re-running against an already provisioned project reuses the web app,
/// credential file and database instead of creating new ones.
///
/// # Errors
///
/// Returns a [`ProvisionError`] for the expected terminal failures and a
/// context-wrapped error for any failing external command.
pub async fn provision(
    firebase: &(impl ProjectManager + AppRegistry + Deployer),
    gcloud: &(impl CloudContext + CredentialIssuer + DatabaseAdmin),
    builder: &impl SiteBuilder,
    tools: &impl ToolProbe,
    workspace: &impl Workspace,
    opts: ProvisionOptions<'_, impl ProgressReporter>,
) -> Result<ProvisionReport> {
    let ProvisionOptions {
        reporter,
        project,
        config,
        skip_deploy,
    } = opts;
    let mut ctx = ProvisionContext::new(project, workspace, config);
    info!(project = %ctx.project, "provisioning started");

    check_tools(tools, skip_deploy).await?;

    acquire_project(firebase, gcloud, &mut ctx, config, reporter).await?;

    reporter.step("configuring gcloud context...");
    gcloud.set_active_project(&ctx.project).await?;
    gcloud.set_quota_project(&ctx.project).await?;

    let rc = files::firebaserc(&ctx.project);
    ctx.record_write(workspace, FIREBASERC_FILE, &rc)?;

    acquire_web_app(firebase, workspace, &mut ctx, config, reporter).await?;
    export_sdk_config(firebase, workspace, &mut ctx, reporter).await?;
    derive_env_file(workspace, &mut ctx, config, reporter)?;
    acquire_credential(gcloud, workspace, &mut ctx, config, reporter).await?;
    ensure_database(gcloud, &mut ctx, config, reporter).await?;

    reporter.step("writing hosting configuration...");
    let hosting = files::hosting_config(&config.public_dir);
    ctx.record_write(workspace, FIREBASE_JSON_FILE, &hosting)?;
    ctx.record_write(workspace, FIRESTORE_INDEXES_FILE, &files::firestore_indexes())?;

    if skip_deploy {
        reporter.warn("skipping build and deploy");
    } else {
        build_and_deploy(builder, firebase, &mut ctx, reporter).await?;
    }

    info!(project = %ctx.project, "provisioning finished");
    ProvisionReport::try_from(ctx)
}

async fn check_tools(tools: &impl ToolProbe, skip_deploy: bool) -> Result<()> {
    let build_tools: &[&str] = if skip_deploy { &[] } else { &[BUILD_TOOL] };
    for tool in PROVIDER_TOOLS.iter().chain(build_tools) {
        if !tools.is_available(tool).await {
            return Err(ProvisionError::MissingTool((*tool).to_string()).into());
        }
    }
    Ok(())
}

async fn acquire_project(
    firebase: &impl ProjectManager,
    gcloud: &impl CloudContext,
    ctx: &mut ProvisionContext,
    config: &ProvisionConfig,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("creating project '{}'...", ctx.project));
    let created = firebase
        .create_project(&ctx.project, &config.project_display_name)
        .await?;
    if created {
        reporter.success(&format!("project '{}' created", ctx.project));
    } else {
        warn!(project = %ctx.project, "project creation refused, assuming it exists");
        reporter.warn("project creation failed; assuming it already exists");
    }
    ctx.project_created = Some(created);

    if !gcloud.confirm_access(&ctx.project).await? {
        let id = ctx.project.to_string();
        let err = if created {
            ProvisionError::CreatedButInaccessible { id }
        } else {
            ProvisionError::Inaccessible { id }
        };
        return Err(err.into());
    }
    reporter.success(&format!("using project '{}'", ctx.project));
    Ok(())
}

async fn acquire_web_app(
    firebase: &impl AppRegistry,
    workspace: &impl Workspace,
    ctx: &mut ProvisionContext,
    config: &ProvisionConfig,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("looking for an existing web app...");
    if let Some(app_id) = firebase.find_web_app(&ctx.project).await? {
        info!(%app_id, "reusing web app");
        reporter.success(&format!("reusing web app {app_id}"));
        ctx.web_app_id = Some(app_id);
        return Ok(());
    }

    reporter.step(&format!("creating web app '{}'...", config.web_app_name));
    let creation = firebase
        .create_web_app(&ctx.project, &config.web_app_name)
        .await?;
    let Some(app_id) = creation.app_id else {
        let dump = workspace.resolve(Path::new(WEBAPP_CREATE_DUMP_FILE));
        workspace.write(&dump, &creation.raw)?;
        return Err(ProvisionError::WebAppIdUnresolved {
            raw: creation.raw,
            saved_to: dump.display().to_string(),
        }
        .into());
    };
    reporter.success(&format!("web app {app_id} created"));
    ctx.web_app_id = Some(app_id);
    ctx.web_app_created = true;
    Ok(())
}

async fn export_sdk_config(
    firebase: &impl AppRegistry,
    workspace: &impl Workspace,
    ctx: &mut ProvisionContext,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let app_id = ctx
        .web_app_id
        .clone()
        .context("web app must be resolved before exporting its config")?;
    reporter.step("exporting web SDK configuration...");
    let snippet = firebase.sdk_config(&ctx.project, &app_id).await?;
    ctx.record_write(workspace, SDK_CONFIG_FILE, &snippet)
}

fn derive_env_file(
    workspace: &impl Workspace,
    ctx: &mut ProvisionContext,
    config: &ProvisionConfig,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let source = workspace.resolve(Path::new(SDK_CONFIG_FILE));
    let payload = workspace.read_to_string(&source)?;
    let sdk = extract_sdk_config(&payload, &source.display().to_string())?;
    let env = render_env_file(&sdk, &config.env);
    ctx.record_write(workspace, ENV_FILE, &env)?;
    reporter.success(&format!("wrote {}", ctx.env_file.display()));
    Ok(())
}

async fn acquire_credential(
    gcloud: &impl CredentialIssuer,
    workspace: &impl Workspace,
    ctx: &mut ProvisionContext,
    config: &ProvisionConfig,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("looking up the admin service account...");
    let account = gcloud
        .find_admin_account(&ctx.project, &config.admin_account_label)
        .await?
        .ok_or_else(|| ProvisionError::AdminAccountMissing {
            label: config.admin_account_label.clone(),
            project: ctx.project.to_string(),
        })?;

    if workspace.exists(&ctx.credential_file) {
        info!(path = %ctx.credential_file.display(), "reusing existing admin key");
        reporter.success(&format!(
            "reusing admin key {}",
            ctx.credential_file.display()
        ));
        ctx.credential_reused = true;
    } else {
        if let Some(parent) = ctx.credential_file.parent() {
            workspace.create_dir_all(parent)?;
        }
        reporter.step(&format!("creating admin key for {account}..."));
        gcloud
            .create_key(&ctx.project, &account, &ctx.credential_file)
            .await
            .context("creating admin service-account key")?;
        reporter.success(&format!("wrote {}", ctx.credential_file.display()));
    }
    ctx.admin_account = Some(account);
    Ok(())
}

async fn ensure_database(
    gcloud: &impl DatabaseAdmin,
    ctx: &mut ProvisionContext,
    config: &ProvisionConfig,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("checking Firestore...");
    if gcloud.database_exists(&ctx.project).await? {
        reporter.success("Firestore database already exists");
        return Ok(());
    }
    reporter.step("enabling Firestore...");
    gcloud.enable_database_service(&ctx.project).await?;
    reporter.step(&format!(
        "creating Firestore database in {}...",
        config.firestore_location
    ));
    gcloud
        .create_database(&ctx.project, &config.firestore_location)
        .await?;
    ctx.database_created = true;
    reporter.success("Firestore database created");
    Ok(())
}

async fn build_and_deploy(
    builder: &impl SiteBuilder,
    firebase: &impl Deployer,
    ctx: &mut ProvisionContext,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("installing dependencies...");
    builder.install().await?;
    reporter.step("building site...");
    builder.build().await?;
    reporter.step("deploying...");
    firebase.deploy(&ctx.project).await?;
    ctx.deployed = true;
    reporter.success("deployed");
    Ok(())
}
