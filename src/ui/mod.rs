//! User interface components.
//!
//! This module provides:
//! Commands talk to a [`UserInterface`]; [`TerminalUI`] renders it with
//! the [`OutputMode`] picked from `--verbose` / `--quiet`, and [`MockUI`]
//! records every call for command tests.
//!
//! # Example
//!
//! ```
//! use srcpack::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("sdist demo-1.0");
//! ui.detail("demo/__init__.py");
//! ui.success("dist/demo-1.0.tar.gz");
//! assert!(ui.has_success("demo-1.0"));
//! assert_eq!(ui.details(), &["demo/__init__.py"]);
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SrcpackTheme};

/// Output sink for commands.
pub trait UserInterface {
    /// Display a result line.
    fn message(&mut self, msg: &str);

    /// Display a line only shown in verbose mode.
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a contextual hint.
    fn hint(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show the banner naming the distribution being built.
    fn show_header(&mut self, title: &str);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}
