//! Check command implementation.
//!
//! The `srcpack check` command verifies that required metadata is present.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::metadata::check_metadata;
use crate::ui::UserInterface;

use super::dispatcher::{load_project_or_report, Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = match load_project_or_report(&self.project_root, ui)? {
            Ok(project) => project,
            Err(failure) => return Ok(failure),
        };

        let mut diagnostics = Diagnostics::new();
        if check_metadata(&project.metadata, &mut diagnostics) {
            ui.success("metadata complete");
            return Ok(CommandResult::success());
        }

        for diagnostic in diagnostics.iter() {
            if self.args.strict {
                ui.error(&diagnostic.to_string());
            } else {
                ui.warning(&diagnostic.to_string());
            }
        }

        if self.args.strict {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project(yaml: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("srcpack.yml"), yaml).unwrap();
        temp
    }

    #[test]
    fn complete_metadata_passes() {
        let temp = project("name: demo\nversion: '1.0'\n");
        let mut ui = MockUI::new();
        let result = CheckCommand::new(temp.path(), CheckArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.has_success("metadata complete"));
    }

    #[test]
    fn missing_fields_warn() {
        let temp = project("author: someone\n");
        let mut ui = MockUI::new();
        let result = CheckCommand::new(temp.path(), CheckArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert_eq!(ui.warnings(), &["warning: check: missing required meta-data: name, version"]);
    }

    #[test]
    fn strict_turns_warning_into_failure() {
        let temp = project("name: demo\n");
        let mut ui = MockUI::new();
        let result = CheckCommand::new(temp.path(), CheckArgs { strict: true })
            .execute(&mut ui)
            .unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("version"));
    }
}
