//! Compilers command implementation.
//!
//! The `srcpack compilers` command reports which toolchain executables are
//! missing from the host.

use serde::Serialize;

use crate::cli::args::CompilersArgs;
use crate::compiler::{find_missing_executable, possible_compiler_types, CompilerType};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

#[derive(Serialize)]
struct ProbeReport {
    compiler_type: CompilerType,
    possible: Vec<CompilerType>,
    missing: Option<String>,
}

/// The compilers command implementation.
pub struct CompilersCommand {
    args: CompilersArgs,
}

impl CompilersCommand {
    /// Create a new compilers command.
    pub fn new(args: CompilersArgs) -> Self {
        Self { args }
    }
}

impl Command for CompilersCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let compiler_type = CompilerType::resolve(self.args.compiler.as_deref())?;
        let names: Vec<&str> = self.args.executables.iter().map(String::as_str).collect();
        let missing = find_missing_executable(&names, Some(compiler_type.name()))?;

        let report = ProbeReport {
            compiler_type,
            possible: possible_compiler_types(),
            missing,
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            let possible: Vec<&str> = report.possible.iter().map(CompilerType::name).collect();
            ui.message(&format!("possible compiler types: {}", possible.join(", ")));
            match &report.missing {
                Some(missing) => ui.error(&format!(
                    "{} ({}): missing executable '{}'",
                    compiler_type,
                    compiler_type.description(),
                    missing
                )),
                None => ui.success(&format!(
                    "{} ({}): all executables found",
                    compiler_type,
                    compiler_type.description()
                )),
            }
        }

        if report.missing.is_some() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SrcpackError;
    use crate::ui::MockUI;

    #[test]
    fn unknown_compiler_is_an_error() {
        let args = CompilersArgs {
            compiler: Some("tcc".into()),
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let err = CompilersCommand::new(args).execute(&mut ui).unwrap_err();
        assert!(matches!(err, SrcpackError::UnknownCompiler { .. }));
    }

    #[cfg(not(windows))]
    #[test]
    fn msvc_reported_missing_off_windows() {
        let args = CompilersArgs {
            compiler: Some("msvc".into()),
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let result = CompilersCommand::new(args).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("missing executable 'msvc'"));
        assert!(ui.has_message("possible compiler types"));
    }
}
