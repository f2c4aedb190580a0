//! Sdist command implementation.
//!
//! The `srcpack sdist` command builds the manifest and archives for the
//! project.

use std::path::{Path, PathBuf};

use crate::cli::args::SdistArgs;
use crate::config::OptionValue;
use crate::diagnostics::Severity;
use crate::error::Result;
use crate::sdist::{SdistCommand as SdistBuilder, SdistReport};
use crate::ui::UserInterface;

use super::dispatcher::{load_project_or_report, Command, CommandResult};

/// The sdist command implementation.
pub struct SdistCommand {
    project_root: PathBuf,
    args: SdistArgs,
}

impl SdistCommand {
    /// Create a new sdist command.
    pub fn new(project_root: &Path, args: SdistArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SdistArgs {
        &self.args
    }

    /// Layer command-line flags over the project file's `sdist:` block.
    fn configure(&self, builder: &mut SdistBuilder) {
        let args = self.args.clone();
        builder.configure(move |options| {
            if let Some(formats) = args.formats {
                options.formats = Some(OptionValue::Text(formats));
            }
            if args.manifest.is_some() {
                options.manifest = args.manifest;
            }
            if args.template.is_some() {
                options.template = args.template;
            }
            if args.dist_dir.is_some() {
                options.dist_dir = args.dist_dir;
            }
            if args.owner.is_some() {
                options.owner = args.owner;
            }
            if args.group.is_some() {
                options.group = args.group;
            }
            if args.no_defaults {
                options.use_defaults = false;
            }
            if args.no_prune {
                options.prune = false;
            }
            if args.no_metadata_check {
                options.metadata_check = false;
            }
            if args.manifest_only {
                options.manifest_only = true;
            }
        });
    }

    fn report(&self, report: &SdistReport, ui: &mut dyn UserInterface) -> Result<()> {
        if self.args.json {
            let json = serde_json::to_string_pretty(report).map_err(anyhow::Error::from)?;
            println!("{}", json);
            return Ok(());
        }

        for diagnostic in report.diagnostics.iter() {
            match diagnostic.severity {
                Severity::Warning => ui.warning(&diagnostic.to_string()),
                Severity::Info => ui.detail(&diagnostic.to_string()),
            }
        }

        for file in &report.files {
            ui.detail(file);
        }

        if report.manifest_written {
            ui.message(&format!("wrote manifest ({} files)", report.files.len()));
        } else {
            ui.message(&format!("using existing manifest ({} files)", report.files.len()));
        }

        for archive in &report.archives {
            ui.success(&format!("{}  {}", archive.path.display(), archive.sha256));
        }
        Ok(())
    }
}

impl Command for SdistCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = match load_project_or_report(&self.project_root, ui)? {
            Ok(project) => project,
            Err(failure) => return Ok(failure),
        };

        let mut builder = SdistBuilder::new(&self.project_root, project);
        self.configure(&mut builder);
        builder.ensure_finalized()?;

        if !self.args.json {
            ui.show_header(&format!("sdist {}", builder.base_dir()));
        }

        let mut spinner = ui.start_spinner("Building source distribution...");
        let report = match builder.run() {
            Ok(report) => {
                spinner.finish_success(&format!("Built {}", report.base_dir));
                report
            }
            Err(e) => {
                spinner.finish_error("Build failed");
                return Err(e);
            }
        };

        self.report(&report, ui)?;
        Ok(CommandResult::success())
    }
}
