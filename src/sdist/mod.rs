//! Source distribution builder.
//!
//! [`SdistCommand`] moves through three states: options are set while
//! unfinalized, validated by [`SdistCommand::ensure_finalized`], and only
//! then may [`SdistCommand::run`] compute the file list, write the manifest
//! and produce archives.
//!
//! # Example
//!
//! ```no_run
//! use srcpack::config::load_project;
//! use srcpack::sdist::SdistCommand;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let mut cmd = SdistCommand::new(root, load_project(root)?);
//! cmd.set_formats("gztar,zip");
//! cmd.ensure_finalized()?;
//! let report = cmd.run()?;
//! for archive in &report.archives {
//!     println!("{} {}", archive.sha256, archive.path.display());
//! }
//! # Ok::<(), srcpack::error::SrcpackError>(())
//! ```

pub mod command;
pub mod defaults;
pub mod options;

pub use command::{prune_file_list, CommandState, SdistCommand, SdistReport, BUILD_DIR};
pub use defaults::{add_defaults, package_dir, READMES};
pub use options::{parse_formats, FinalizedOptions, SdistOptions};
