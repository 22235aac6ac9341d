//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Provision a Firebase backend and hosting site for an AutoRA experiment
#[derive(Parser, Debug)]
#[command(name = "firebase-provision", version)]
pub struct Cli {
    /// Project ID to create or reuse (defaults to the configured project ID)
    pub project_id: Option<String>,

    /// YAML configuration file
    #[arg(long, env = "FIREBASE_PROVISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stop after writing hosting configuration; skip build and deploy
    #[arg(long)]
    pub skip_deploy: bool,

    /// Output the completion report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output (`NO_COLOR=1` is honoured too)
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::BoolishValueParser::new())]
    pub no_color: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or any provisioning step fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            project_id,
            config,
            skip_deploy,
            json,
            quiet,
            no_color,
            verbose: _,
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
            config,
        })?;
        let args = commands::provision::ProvisionArgs {
            project_id,
            skip_deploy,
        };
        commands::provision::run(&args, &app).await
    }
}
