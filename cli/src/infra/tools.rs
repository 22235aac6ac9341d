//! Infrastructure implementation of the `ToolProbe` port.

use tracing::debug;

use crate::application::ports::{CommandRunner, ToolProbe};

/// Probes tools by running `<tool> --version`.
pub struct VersionProbe<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> VersionProbe<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ToolProbe for VersionProbe<R> {
    async fn is_available(&self, tool: &str) -> bool {
        match self.runner.run(tool, &["--version"]).await {
            Ok(output) => {
                let found = output.status.success();
                if found {
                    let version = String::from_utf8_lossy(&output.stdout);
                    let first_line = version.lines().next().unwrap_or_default().trim();
                    debug!(tool, version = first_line, "found");
                }
                found
            }
            Err(e) => {
                debug!(tool, error = %e, "not found");
                false
            }
        }
    }
}
