//! Terminal stylesheet (owo-colors).

use owo_colors::Style;

/// Styles for progress lines and the completion report.
///
/// `Styles::default()` is the plain sheet: every style is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct Styles {
    /// `✓` marks.
    pub ok: Style,
    /// `⚠` marks.
    pub caution: Style,
    /// `✗` marks and the failure message.
    pub failure: Style,
    /// Step counters such as `[3]`.
    pub counter: Style,
    /// Report field labels.
    pub label: Style,
    /// Report title.
    pub title: Style,
    /// The hosting URL.
    pub url: Style,
}

impl Styles {
    /// The colored sheet.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            caution: Style::new().yellow(),
            failure: Style::new().red().bold(),
            counter: Style::new().cyan(),
            label: Style::new().dimmed(),
            title: Style::new().bold().green(),
            url: Style::new().underline().blue(),
        }
    }
}
