//! Web SDK configuration: extraction from `firebase apps:sdkconfig` output and
//! rendering into a `.env` file.
//!
//! Pure functions only, no I/O.

#![allow(clippy::expect_used)] // Pattern is a compile-time constant

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::domain::config::EnvSettings;
use crate::domain::error::ProvisionError;

/// `firebase.initializeApp({ ... });`: captures the object literal up to the
/// last `}` that closes the call, so nested objects stay inside the capture.
static INITIALIZE_APP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)firebase\.initializeApp\(\s*(\{.*\})\s*\)").expect("valid regex")
});

/// The six client connection parameters a web client needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

/// Extract the SDK configuration object embedded in `payload`.
///
/// `source` names where the payload came from and only appears in errors.
///
/// # Errors
///
/// Returns [`ProvisionError::SdkConfigNotFound`] if there is no
/// `firebase.initializeApp(...)` call, and
/// [`ProvisionError::SdkConfigMalformed`] if the literal is not JSON or lacks
/// one of the six fields, or if a value holds a `"` or a line break.
pub fn extract_sdk_config(payload: &str, source: &str) -> Result<SdkConfig, ProvisionError> {
    let literal = INITIALIZE_APP_RE
        .captures(payload)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ProvisionError::SdkConfigNotFound {
            path: source.to_string(),
        })?
        .as_str();

    let malformed = |reason: String| ProvisionError::SdkConfigMalformed {
        path: source.to_string(),
        reason,
    };
    let config: SdkConfig = serde_json::from_str(literal).map_err(|e| malformed(e.to_string()))?;
    if let Some(field) = config.unquotable_field() {
        return Err(malformed(format!(
            "{field} contains a quote or line break"
        )));
    }
    Ok(config)
}

impl SdkConfig {
    /// Name of the first value that cannot sit inside `NAME="value"`.
    fn unquotable_field(&self) -> Option<&'static str> {
        [
            ("apiKey", &self.api_key),
            ("authDomain", &self.auth_domain),
            ("projectId", &self.project_id),
            ("storageBucket", &self.storage_bucket),
            ("messagingSenderId", &self.messaging_sender_id),
            ("appId", &self.app_id),
        ]
        .into_iter()
        .find(|(_, value)| value.contains(['"', '\n', '\r']))
        .map(|(name, _)| name)
    }
}

/// Render the `.env` file consumed by the experiment front end.
///
/// Six derived variables followed by the three fixed flags, one
/// `NAME="value"` per line, no blank lines, one trailing newline.
#[must_use]
pub fn render_env_file(config: &SdkConfig, settings: &EnvSettings) -> String {
    let entries: [(&str, &str); 9] = [
        ("apiKey", &config.api_key),
        ("authDomain", &config.auth_domain),
        ("projectId", &config.project_id),
        ("storageBucket", &config.storage_bucket),
        ("messagingSenderId", &config.messaging_sender_id),
        ("appId", &config.app_id),
        ("devNoDb", &settings.dev_no_db),
        ("useProlificId", &settings.use_prolific_id),
        ("completionCode", &settings.completion_code),
    ];

    let mut out = String::new();
    for (name, value) in entries {
        let _ = writeln!(out, "{}{name}=\"{}\"", settings.prefix, value.trim());
    }
    out
}
