//! Domain types and validators for provisioning configuration.
//!
//! Pure functions only, no I/O.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::project::ProjectId;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration, read from `provision.yaml` or `--config`.
///
/// Every field has a default, so an empty or absent file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Project ID used when none is passed on the command line.
    pub default_project_id: String,
    /// Display name given to a newly created project.
    pub project_display_name: String,
    /// Display name given to a newly created web app.
    pub web_app_name: String,
    /// Display name of the Firebase Admin SDK service account.
    pub admin_account_label: String,
    /// Where the admin key file lives, relative to the working directory.
    pub credential_path: PathBuf,
    /// Firestore location used when the database has to be created.
    pub firestore_location: String,
    /// Static asset directory produced by the build and served by Hosting.
    pub public_dir: String,
    /// Generated `.env` settings.
    pub env: EnvSettings,
    /// Timeout for captured provider CLI calls, in seconds.
    pub command_timeout_secs: u64,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            default_project_id: "autora-closed-loop".to_string(),
            project_display_name: "AutoRA Closed Loop".to_string(),
            web_app_name: "AutoRA Web".to_string(),
            admin_account_label: "firebase-adminsdk".to_string(),
            credential_path: PathBuf::from("../researcher_hub/firebase-service-account.json"),
            firestore_location: "nam5".to_string(),
            public_dir: "build".to_string(),
            env: EnvSettings::default(),
            command_timeout_secs: 120,
        }
    }
}

/// Settings for the derived `.env` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSettings {
    /// Prefix prepended to every variable name.
    pub prefix: String,
    /// Value of the `devNoDb` flag.
    pub dev_no_db: String,
    /// Value of the `useProlificId` flag.
    pub use_prolific_id: String,
    /// Completion code shown to participants.
    pub completion_code: String,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            prefix: "REACT_APP_".to_string(),
            dev_no_db: "False".to_string(),
            use_prolific_id: "False".to_string(),
            completion_code: "complete".to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

impl ProvisionConfig {
    /// Check values that would otherwise fail late, mid-provisioning.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid key.
    pub fn validate(&self) -> Result<()> {
        if ProjectId::parse(&self.default_project_id).is_err() {
            return Err(invalid("default_project_id", &self.default_project_id));
        }
        if self.command_timeout_secs == 0 {
            return Err(invalid("command_timeout_secs", "0"));
        }
        if self.env.prefix.is_empty() || self.env.prefix.contains(char::is_whitespace) {
            return Err(invalid("env.prefix", &self.env.prefix));
        }
        for (key, value) in [
            ("env.dev_no_db", &self.env.dev_no_db),
            ("env.use_prolific_id", &self.env.use_prolific_id),
            ("env.completion_code", &self.env.completion_code),
        ] {
            if value.contains(['"', '\n']) {
                return Err(invalid(key, value));
            }
        }
        for (key, value) in [
            ("firestore_location", &self.firestore_location),
            ("public_dir", &self.public_dir),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(key, value));
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
