//! Repository command implementation.
//!
//! The `srcpack repository` command shows the index server resolved from
//! `.pypirc`, or stores credentials in a fresh file.

use std::path::PathBuf;

use crate::cli::args::RepositoryArgs;
use crate::config::Pypirc;
use crate::error::{Result, SrcpackError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The repository command implementation.
pub struct RepositoryCommand {
    args: RepositoryArgs,
}

impl RepositoryCommand {
    /// Create a new repository command.
    pub fn new(args: RepositoryArgs) -> Self {
        Self { args }
    }

    fn pypirc(&self) -> Result<Pypirc> {
        match &self.args.config_file {
            Some(path) => Ok(Pypirc::new(path)),
            None => Pypirc::user_default().ok_or_else(|| SrcpackError::RepositoryConfig {
                path: PathBuf::from(".pypirc"),
                message: "cannot locate the home directory".to_string(),
            }),
        }
    }
}

impl Command for RepositoryCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pypirc = self.pypirc()?;

        if let (Some(username), Some(password)) = (&self.args.username, &self.args.password) {
            pypirc.store(username, password)?;
            ui.success(&format!("stored credentials in {}", pypirc.path().display()));
            return Ok(CommandResult::success());
        }

        match pypirc.read(self.args.repository.as_deref())? {
            Some(config) => {
                ui.message(&format!("server:     {}", config.server));
                ui.message(&format!("repository: {}", config.repository));
                ui.message(&format!("realm:      {}", config.realm));
                ui.message(&format!("username:   {}", config.username));
                if let Some(masked) = config.masked_password() {
                    ui.message(&format!("password:   {}", masked));
                }
                Ok(CommandResult::success())
            }
            None => {
                ui.warning(&format!(
                    "no matching repository in {}",
                    pypirc.path().display()
                ));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
