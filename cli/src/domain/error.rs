//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Terminal failures of the provisioning pipeline.
///
/// Every variant aborts the run with exit status 1. None of them are retried.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "Invalid project ID '{0}': must be 6-30 characters, start with a lowercase letter, \
contain only lowercase letters, digits and hyphens, and end with a letter or digit."
    )]
    InvalidProjectId(String),

    #[error(
        "Project '{id}' was created but cannot be selected. \
Check that the active Firebase account has access to it."
    )]
    CreatedButInaccessible { id: String },

    #[error(
        "Project '{id}' could not be created and is not accessible. \
The ID may be taken by another account; choose a different project ID."
    )]
    Inaccessible { id: String },

    #[error("Could not determine the web app ID from the create response (saved to {saved_to}):\n{raw}")]
    WebAppIdUnresolved { raw: String, saved_to: String },

    #[error("No firebase.initializeApp({{...}}) block found in {path}")]
    SdkConfigNotFound { path: String },

    #[error("SDK configuration in {path} is malformed: {reason}")]
    SdkConfigMalformed { path: String, reason: String },

    #[error("No service account with display name '{label}' found in project '{project}'.")]
    AdminAccountMissing { label: String, project: String },

    #[error("Required tool '{0}' is not installed or not on PATH.")]
    MissingTool(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to loading the provisioning configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
