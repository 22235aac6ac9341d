//! Human-readable completion report.

use std::fmt::Write as _;

use owo_colors::OwoColorize as _;

use crate::application::services::provision::ProvisionReport;
use crate::output::OutputContext;

/// Renders the completion report as human-readable terminal output.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Print the report to stdout. Quiet mode keeps only the URL and the
    /// two artifact paths, one per line.
    pub fn render_report(&self, report: &ProvisionReport) {
        if self.ctx.quiet {
            print!("{}", format_essentials(report));
        } else {
            print!("{}", self.format_report(report));
        }
    }

    /// The report text.
    ///
    /// The URL follows the default `<project>.web.app` site name; a project
    /// with a renamed default site serves elsewhere.
    #[must_use]
    pub fn format_report(&self, report: &ProvisionReport) -> String {
        let ctx = self.ctx;
        let title = format!("{} is ready", report.project_id);
        let url = report.hosting_url.style(ctx.styles.url).to_string();
        let hosting = if report.deployed {
            url
        } else {
            format!("{url} (not deployed)")
        };

        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", title.style(ctx.styles.title));
        let _ = writeln!(out);
        for (label, value) in [
            ("Hosting", hosting),
            ("Web app", created_or_reused(&report.web_app_id, report.web_app_created)),
            ("Admin", report.admin_account.clone()),
            ("Credential", credential_line(report)),
            ("Env file", report.env_file.display().to_string()),
            ("Firestore", database_state(report.database_created).to_string()),
        ] {
            let _ = writeln!(out, "{}", ctx.field(label, &value));
        }
        out
    }
}

/// Hosting URL, `.env` path and credential path, unstyled.
#[must_use]
pub fn format_essentials(report: &ProvisionReport) -> String {
    format!(
        "{}\n{}\n{}\n",
        report.hosting_url,
        report.env_file.display(),
        report.credential_file.display()
    )
}

fn created_or_reused(value: &str, created: bool) -> String {
    if created {
        format!("{value} (created)")
    } else {
        value.to_string()
    }
}

fn credential_line(report: &ProvisionReport) -> String {
    let path = report.credential_file.display();
    if report.credential_reused {
        format!("{path} (existing key kept)")
    } else {
        path.to_string()
    }
}

fn database_state(created: bool) -> &'static str {
    if created { "created" } else { "already present" }
}
