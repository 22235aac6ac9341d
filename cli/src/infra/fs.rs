//! Filesystem infrastructure: implements the `Workspace` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::Workspace;

/// The working directory the tool provisions into.
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    /// Workspace rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Workspace rooted at the process's current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn current_dir() -> Result<Self> {
        let root = std::env::current_dir().context("cannot determine current directory")?;
        Ok(Self::new(root))
    }
}

impl Workspace for LocalFs {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = self.resolve(path);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    /// Atomic write via temp file then rename, so readers never see a
    /// half-written file.
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let path = self.resolve(path);
        let file_name = path
            .file_name()
            .with_context(|| format!("{} has no file name", path.display()))?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        std::fs::write(&temp_path, content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("finalizing {}", path.display()))?;
        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.resolve(path);
        std::fs::read_to_string(&path).with_context(|| format!("reading file {}", path.display()))
    }
}
