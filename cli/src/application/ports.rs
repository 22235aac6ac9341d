//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;

use crate::domain::{ProjectId, ProvisionConfig};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Result of `firebase apps:create`.
///
/// `raw` is kept so an unusable response can be dumped for diagnosis.
#[derive(Debug, Clone)]
pub struct WebAppCreation {
    /// Parsed app ID; `None` when missing, empty, or `null`.
    pub app_id: Option<String>,
    /// Captured stdout followed by stderr.
    pub raw: String,
}

// ── Project Ports ─────────────────────────────────────────────────────────────

/// Firebase project lifecycle.
#[allow(async_fn_in_trait)]
pub trait ProjectManager {
    /// Attempt to create the project. `Ok(false)` means the provider refused,
    /// which usually means the project already exists.
    async fn create_project(&self, project: &ProjectId, display_name: &str) -> Result<bool>;
}

/// Active-context configuration for Google Cloud calls.
#[allow(async_fn_in_trait)]
pub trait CloudContext {
    /// `Ok(false)` when the active account cannot read the project.
    async fn confirm_access(&self, project: &ProjectId) -> Result<bool>;
    /// Make `project` the default for subsequent `gcloud` calls.
    async fn set_active_project(&self, project: &ProjectId) -> Result<()>;
    /// Attribute application-default credential quota to `project`.
    async fn set_quota_project(&self, project: &ProjectId) -> Result<()>;
}

// ── App Registry Port ─────────────────────────────────────────────────────────

/// Web app registrations and their SDK configuration.
#[allow(async_fn_in_trait)]
pub trait AppRegistry {
    /// First registered app with platform `WEB`, if any.
    async fn find_web_app(&self, project: &ProjectId) -> Result<Option<String>>;
    /// Register a new web app.
    async fn create_web_app(&self, project: &ProjectId, display_name: &str)
    -> Result<WebAppCreation>;
    /// The raw `firebase.initializeApp(...)` snippet for `app_id`.
    async fn sdk_config(&self, project: &ProjectId, app_id: &str) -> Result<String>;
}

// ── Credential Port ───────────────────────────────────────────────────────────

/// Service-account discovery and key issuance.
#[allow(async_fn_in_trait)]
pub trait CredentialIssuer {
    /// Email of the service account whose display name matches `label`.
    async fn find_admin_account(&self, project: &ProjectId, label: &str) -> Result<Option<String>>;
    /// Create a new private key for `account` and write it to `dest`.
    async fn create_key(&self, project: &ProjectId, account: &str, dest: &Path) -> Result<()>;
}

// ── Database Port ─────────────────────────────────────────────────────────────

/// Firestore administration.
#[allow(async_fn_in_trait)]
pub trait DatabaseAdmin {
    /// Whether the `(default)` database exists.
    async fn database_exists(&self, project: &ProjectId) -> Result<bool>;
    /// Enable the Firestore API for the project.
    async fn enable_database_service(&self, project: &ProjectId) -> Result<()>;
    /// Create the `(default)` database in `location`.
    async fn create_database(&self, project: &ProjectId, location: &str) -> Result<()>;
}

// ── Build and Deploy Ports ────────────────────────────────────────────────────

/// Front-end package toolchain.
#[allow(async_fn_in_trait)]
pub trait SiteBuilder {
    /// Install package dependencies.
    async fn install(&self) -> Result<()>;
    /// Produce the static site.
    async fn build(&self) -> Result<()>;
}

/// Deploys every target declared in `firebase.json`.
#[allow(async_fn_in_trait)]
pub trait Deployer {
    async fn deploy(&self, project: &ProjectId) -> Result<()>;
}

/// Checks that an external tool can be executed.
#[allow(async_fn_in_trait)]
pub trait ToolProbe {
    /// `true` when `<tool> --version` runs and exits zero.
    async fn is_available(&self, tool: &str) -> bool;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem and Config Ports ───────────────────────────────────────────────

/// The directory the tool provisions into.
///
/// Relative paths are resolved against the workspace root.
pub trait Workspace {
    /// Absolute form of `path`.
    fn resolve(&self, path: &Path) -> PathBuf;
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Replace the file's content in full.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Abstracts loading the provisioning configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<ProvisionConfig>;
    /// The file the configuration is (or would be) read from.
    fn path(&self) -> Option<PathBuf>;
}
