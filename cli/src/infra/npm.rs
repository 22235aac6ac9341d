//! Infrastructure adapter for the front-end package toolchain.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, SiteBuilder};
use crate::infra::command_runner::ensure_status;

const NPM: &str = "npm";

/// Runs `npm install` and `npm run build` in the working directory with
/// inherited stdio, so the toolchain's own output reaches the terminal.
pub struct NpmCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> NpmCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> SiteBuilder for NpmCli<R> {
    async fn install(&self) -> Result<()> {
        let status = self
            .runner
            .run_status(NPM, &["install"])
            .await
            .context("npm install")?;
        ensure_status(status, "npm install")
    }

    async fn build(&self) -> Result<()> {
        let status = self
            .runner
            .run_status(NPM, &["run", "build"])
            .await
            .context("npm run build")?;
        ensure_status(status, "npm run build")
    }
}
