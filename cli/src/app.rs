//! Process-wide wiring: loaded configuration, output settings and the
//! production adapters, each backed by its own `TokioCommandRunner`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::ProvisionConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::firebase::FirebaseCli;
use crate::infra::fs::LocalFs;
use crate::infra::gcloud::GcloudCli;
use crate::infra::npm::NpmCli;
use crate::infra::tools::VersionProbe;
use crate::output::{HumanRenderer, OutputContext, TerminalReporter};

/// How the completion report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Global flags that shape the context.
pub struct AppFlags {
    pub no_color: bool,
    pub quiet: bool,
    pub json: bool,
    /// `--config` / `FIREBASE_PROVISION_CONFIG`.
    pub config: Option<PathBuf>,
}

/// Everything the provision command needs from the outside world.
pub struct AppContext {
    pub output: OutputContext,
    pub mode: OutputMode,
    pub config: ProvisionConfig,
    pub firebase: FirebaseCli<TokioCommandRunner>,
    pub gcloud: GcloudCli<TokioCommandRunner>,
    pub npm: NpmCli<TokioCommandRunner>,
    pub tools: VersionProbe<TokioCommandRunner>,
    /// The working directory being provisioned.
    pub workspace: LocalFs,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the current
    /// directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let config = YamlConfigStore::new(flags.config.clone()).load()?;
        let timeout = Duration::from_secs(config.command_timeout_secs);

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            firebase: FirebaseCli::new(TokioCommandRunner::new(timeout)),
            gcloud: GcloudCli::new(TokioCommandRunner::new(timeout)),
            npm: NpmCli::new(TokioCommandRunner::new(timeout)),
            tools: VersionProbe::new(TokioCommandRunner::new(timeout)),
            workspace: LocalFs::current_dir()?,
            config,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Progress reporter bound to this context's output.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Human renderer bound to this context's output.
    #[must_use]
    pub fn human(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }
}
