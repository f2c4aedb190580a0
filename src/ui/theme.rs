//! Colors and icons for terminal output.

use console::Style;

/// Styles applied by [`super::TerminalUI`].
#[derive(Debug, Clone)]
pub struct SrcpackTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Manifest entries and notes in verbose output.
    pub detail: Style,
    /// Archive base name in the header.
    pub highlight: Style,
    pub header: Style,
    pub hint: Style,
}

impl Default for SrcpackTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SrcpackTheme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            detail: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// Theme without styling, for `--no-color` and pipes.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            detail: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Indented, dimmed line for verbose listings.
    pub fn format_detail(&self, msg: &str) -> String {
        format!("  {}", self.detail.apply_to(msg))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("▣"), self.highlight.apply_to(title))
    }
}

/// Whether stdout should be colored: a terminal, and `NO_COLOR` unset.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
