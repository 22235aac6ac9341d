//! Domain layer: pure types, parsing, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod firebase;
pub mod project;
pub mod sdk_config;

pub use config::{EnvSettings, ProvisionConfig};
pub use error::{ConfigError, ProvisionError};
pub use project::ProjectId;
pub use sdk_config::{SdkConfig, extract_sdk_config, render_env_file};
