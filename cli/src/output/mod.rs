//! Terminal output.
//!
//! Progress and failures go to stderr; stdout carries only the completion
//! report, so `--json` output can be piped.

pub mod human;
pub mod json;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Width of the label column in the completion report.
const LABEL_WIDTH: usize = 12;

/// Styling and verbosity shared by every printer.
pub struct OutputContext {
    pub styles: Styles,
    /// Suppresses progress lines and the human report. Failures still print.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only when stderr is a terminal and neither
    /// `--no-color` nor `NO_COLOR` is set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let colored =
            !no_color && Term::stderr().is_term() && std::env::var_os("NO_COLOR").is_none();
        let styles = if colored {
            Styles::colored()
        } else {
            Styles::default()
        };
        Self { styles, quiet }
    }

    /// `  [n] message` on stderr.
    pub fn progress(&self, index: usize, msg: &str) {
        if !self.quiet {
            let counter = format!("[{index}]");
            eprintln!("  {} {msg}", counter.style(self.styles.counter));
        }
    }

    /// `      ✓ message` on stderr, indented under the current step.
    pub fn done(&self, msg: &str) {
        if !self.quiet {
            eprintln!("      {} {msg}", "✓".style(self.styles.ok));
        }
    }

    /// `      ⚠ message` on stderr.
    pub fn caution(&self, msg: &str) {
        if !self.quiet {
            eprintln!("      {} {msg}", "⚠".style(self.styles.caution));
        }
    }

    /// `✗ message` on stderr. Printed even when quiet.
    pub fn failure(&self, msg: &str) {
        eprintln!(
            "{} {}",
            "✗".style(self.styles.failure),
            msg.style(self.styles.failure)
        );
    }

    /// One `label  value` row of the completion report.
    #[must_use]
    pub fn field(&self, label: &str, value: &str) -> String {
        let padded = format!("{label:<LABEL_WIDTH$}");
        format!("  {}{value}", padded.style(self.styles.label))
    }
}
