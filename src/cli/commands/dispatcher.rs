//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_project, ProjectConfig, PROJECT_FILE};
use crate::error::{Result, SrcpackError};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Sdist(args) => {
                let cmd = super::sdist::SdistCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Commands::Formats(args) => {
                let cmd = super::formats::FormatsCommand::new(args.clone());
                cmd.execute(ui)
            }
            Commands::Compilers(args) => {
                let cmd = super::compilers::CompilersCommand::new(args.clone());
                cmd.execute(ui)
            }
            Commands::Repository(args) => {
                let cmd = super::repository::RepositoryCommand::new(args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

/// Load the project file, reporting a missing or malformed one through `ui`.
///
/// Returns `Ok(Err(result))` with the failure to hand back to the caller.
pub(crate) fn load_project_or_report(
    project_root: &Path,
    ui: &mut dyn UserInterface,
) -> Result<std::result::Result<ProjectConfig, CommandResult>> {
    match load_project(project_root) {
        Ok(project) => Ok(Ok(project)),
        Err(SrcpackError::ProjectNotFound { path }) => {
            ui.error(&format!("Project file not found: {}", path.display()));
            ui.hint(&format!("Create {} with at least a name and a version.", PROJECT_FILE));
            Ok(Err(CommandResult::failure(2)))
        }
        Err(SrcpackError::ProjectParseError { path, message }) => {
            ui.error(&format!("Parse error in {}: {}", path.display(), message));
            Ok(Err(CommandResult::failure(1)))
        }
        Err(e) => Err(e),
    }
}
