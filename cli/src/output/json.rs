//! JSON output helpers for `--json` mode.

use anyhow::{Context, Result};

use crate::application::services::provision::ProvisionReport;

/// Pretty-printed completion report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &ProvisionReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
