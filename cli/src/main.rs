//! firebase-provision - Firebase backend provisioning for AutoRA experiments

use clap::Parser;

use firebase_provision::cli::Cli;
use firebase_provision::logging;
use firebase_provision::output::{OutputContext, json};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let (no_color, json_mode) = (cli.no_color, cli.json);

    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "provisioning failed");
        if json_mode {
            if let Ok(obj) = json::format_error(&format!("{e:#}")) {
                println!("{obj}");
            }
        }
        OutputContext::new(no_color, false).failure(&format!("{e:#}"));
        std::process::exit(1);
    }
}
