//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::ProvisionConfig;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "provision.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file.
///
/// Lookup order: the explicit path (from `--config` or
/// `FIREBASE_PROVISION_CONFIG`), `./provision.yaml`, then
/// `<config dir>/firebase-provision/config.yaml`. With none present the
/// defaults apply.
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
    search: Vec<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        let mut search = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            search.push(dir.join("firebase-provision").join("config.yaml"));
        }
        Self { explicit, search }
    }

    /// Store with an explicit search list (used in tests).
    #[must_use]
    pub fn with_search_paths(explicit: Option<PathBuf>, search: Vec<PathBuf>) -> Self {
        Self { explicit, search }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<ProvisionConfig> {
        let Some(path) = self.path() else {
            debug!("no config file found, using defaults");
            return Ok(ProvisionConfig::default());
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: ProvisionConfig = if content.trim().is_empty() {
            ProvisionConfig::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        };
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit {
            return Some(path.clone());
        }
        self.search.iter().find(|p| p.is_file()).cloned()
    }
}
