//! Firebase project files and provider response parsing.
//!
//! Builds the contents of `.firebaserc`, `firebase.json` and
//! `firestore.indexes.json`, and reads the JSON emitted by
//! `firebase apps:* --json` and `gcloud iam service-accounts list --format json`.
//! Pure functions only.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::domain::project::ProjectId;

// ── File names ───────────────────────────────────────────────────────────────

pub const FIREBASERC_FILE: &str = ".firebaserc";
pub const FIREBASE_JSON_FILE: &str = "firebase.json";
pub const FIRESTORE_INDEXES_FILE: &str = "firestore.indexes.json";
pub const SDK_CONFIG_FILE: &str = "firebase-config.js";
pub const ENV_FILE: &str = ".env";
pub const WEBAPP_CREATE_DUMP_FILE: &str = "webapp_create.json";

/// App ID value the CLI has been seen to print when creation half-failed.
const NULL_SENTINEL: &str = "null";

// ── Generated files ──────────────────────────────────────────────────────────

/// `.firebaserc`: binds the `default` alias to `project`.
#[must_use]
pub fn firebaserc(project: &ProjectId) -> String {
    pretty(&json!({ "projects": { "default": project.as_str() } }))
}

/// `firebase.json`: single-page hosting of `public_dir`.
#[must_use]
pub fn hosting_config(public_dir: &str) -> String {
    pretty(&json!({
        "hosting": {
            "public": public_dir,
            "ignore": ["firebase.json", "**/.*", "**/node_modules/**"],
            "rewrites": [{ "source": "**", "destination": "/index.html" }]
        }
    }))
}

/// `firestore.indexes.json` with no composite indexes and no field overrides.
#[must_use]
pub fn firestore_indexes() -> String {
    pretty(&json!({ "indexes": [], "fieldOverrides": [] }))
}

fn pretty(value: &serde_json::Value) -> String {
    // Serializing a `Value` built from literals cannot fail.
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

// ── Provider responses ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CliEnvelope<T> {
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppEntry {
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    platform: Option<String>,
}

/// First web app ID in the output of `firebase apps:list --json`.
///
/// # Errors
///
/// Returns an error if `stdout` is not the JSON envelope the CLI prints.
pub fn first_web_app_id(stdout: &str) -> Result<Option<String>> {
    let envelope: CliEnvelope<Vec<AppEntry>> =
        serde_json::from_str(stdout.trim()).context("parsing `firebase apps:list` output")?;
    Ok(envelope
        .result
        .unwrap_or_default()
        .into_iter()
        .filter(|app| {
            app.platform
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case("web"))
        })
        .find_map(|app| usable_app_id(app.app_id)))
}

/// App ID in the output of `firebase apps:create WEB ... --json`.
///
/// Returns `None` for unparseable output and for empty or `null` IDs.
#[must_use]
pub fn created_app_id(stdout: &str) -> Option<String> {
    serde_json::from_str::<CliEnvelope<AppEntry>>(stdout.trim())
        .ok()
        .and_then(|envelope| envelope.result)
        .and_then(|app| usable_app_id(app.app_id))
}

fn usable_app_id(raw: Option<String>) -> Option<String> {
    raw.map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && id != NULL_SENTINEL)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceAccountEntry {
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Email of the first account labelled `label` in the output of
/// `gcloud iam service-accounts list --format json`.
///
/// The gcloud `--filter` already narrows the list; the label is re-checked
/// here as a prefix match because gcloud's `:` operator is a substring match.
///
/// # Errors
///
/// Returns an error if `stdout` is not a JSON array of accounts.
pub fn admin_account_email(stdout: &str, label: &str) -> Result<Option<String>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let accounts: Vec<ServiceAccountEntry> =
        serde_json::from_str(trimmed).context("parsing `gcloud iam service-accounts list` output")?;
    Ok(accounts
        .into_iter()
        .find(|a| a.display_name.as_deref().is_some_and(|d| d.starts_with(label)))
        .map(|a| a.email))
}
