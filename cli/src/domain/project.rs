//! Project identifier type and pure validation.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

#![allow(clippy::expect_used)] // Pattern is a compile-time constant

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::ProvisionError;

/// Domain suffix Firebase Hosting assigns to a project's default site.
pub const HOSTING_DOMAIN: &str = "web.app";

static PROJECT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{4,28}[a-z0-9]$").expect("valid regex"));

/// A validated Google Cloud / Firebase project identifier.
///
/// 6 to 30 characters, starting with a lowercase letter, ending with a
/// lowercase letter or digit, lowercase letters, digits and hyphens between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Validate `raw` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::InvalidProjectId`] if `raw` does not match
    /// the project ID format.
    pub fn parse(raw: &str) -> Result<Self, ProvisionError> {
        if PROJECT_ID_RE.is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(ProvisionError::InvalidProjectId(raw.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public URL of the project's default hosting site.
    ///
    /// Follows the `<id>.web.app` convention; projects with a custom default
    /// site name are not detected.
    #[must_use]
    pub fn hosting_url(&self) -> String {
        format!("https://{}.{HOSTING_DOMAIN}", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
