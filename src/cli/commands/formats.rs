//! Formats command implementation.
//!
//! The `srcpack formats` command lists the registered archive formats.

use serde::Serialize;

use crate::archive::{show_formats, ArchiveFormat};
use crate::cli::args::FormatsArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

#[derive(Serialize)]
struct FormatEntry {
    name: &'static str,
    extension: &'static str,
    description: &'static str,
}

/// The formats command implementation.
pub struct FormatsCommand {
    args: FormatsArgs,
}

impl FormatsCommand {
    /// Create a new formats command.
    pub fn new(args: FormatsArgs) -> Self {
        Self { args }
    }
}

impl Command for FormatsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            let entries: Vec<FormatEntry> = ArchiveFormat::ALL
                .iter()
                .map(|f| FormatEntry {
                    name: f.name(),
                    extension: f.extension(),
                    description: f.description(),
                })
                .collect();
            let json = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            ui.message(show_formats().trim_end());
        }
        Ok(CommandResult::success())
    }
}
