//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, ProgressSpinner, SpinnerHandle, SrcpackTheme, UserInterface};

/// Writes results to stdout and errors to stderr.
pub struct TerminalUI {
    out: Term,
    theme: SrcpackTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors {
            SrcpackTheme::new()
        } else {
            SrcpackTheme::plain()
        };

        Self {
            out: Term::stdout(),
            theme,
            mode,
        }
    }

    fn line(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        self.line(msg);
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            let text = self.theme.format_detail(msg);
            self.line(&text);
        }
    }

    fn success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        self.line(&text);
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            let text = self.theme.format_warning(msg);
            self.line(&text);
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(Term::stderr(), "{}", self.theme.format_error(msg)).ok();
    }

    fn hint(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            let text = format!("  {}", self.theme.hint.apply_to(msg));
            self.line(&text);
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() && self.out.is_term() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            let text = self.theme.format_header(title);
            self.line(&text);
        }
    }
}

/// Create the terminal UI, honoring `--no-color` and `NO_COLOR`.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, !no_color && should_use_colors()))
}
