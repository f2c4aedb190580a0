//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// srcpack - Build source distributions from manifest templates.
#[derive(Debug, Parser)]
#[command(name = "srcpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a source distribution
    Sdist(SdistArgs),

    /// Check project metadata for required fields
    Check(CheckArgs),

    /// List available archive formats
    Formats(FormatsArgs),

    /// Report missing C toolchain executables
    Compilers(CompilersArgs),

    /// Show or store package index credentials
    Repository(RepositoryArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `sdist` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SdistArgs {
    /// Archive formats (comma-separated), e.g. gztar,zip
    #[arg(short, long)]
    pub formats: Option<String>,

    /// Manifest file name
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Manifest template file name
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Directory to put archives in
    #[arg(short, long)]
    pub dist_dir: Option<PathBuf>,

    /// Do not include the default file set
    #[arg(long)]
    pub no_defaults: bool,

    /// Do not prune build output and version-control files
    #[arg(long)]
    pub no_prune: bool,

    /// Only regenerate the manifest
    #[arg(short = 'o', long)]
    pub manifest_only: bool,

    /// Skip the metadata check
    #[arg(long)]
    pub no_metadata_check: bool,

    /// Owner name recorded in tar archives
    #[arg(short = 'u', long)]
    pub owner: Option<String>,

    /// Group name recorded in tar archives
    #[arg(short, long)]
    pub group: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Fail when required metadata is missing
    #[arg(short, long)]
    pub strict: bool,
}

/// Arguments for the `formats` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FormatsArgs {
    /// Print formats as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `compilers` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CompilersArgs {
    /// Compiler type to probe (defaults to the platform compiler)
    #[arg(short, long)]
    pub compiler: Option<String>,

    /// Executable roles to check (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub executables: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `repository` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RepositoryArgs {
    /// Repository name or URL
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Username to store
    #[arg(long, requires = "password")]
    pub username: Option<String>,

    /// Password to store
    #[arg(long, requires = "username", env = "SRCPACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Path to the configuration file (defaults to ~/.pypirc)
    #[arg(long)]
    pub config_file: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
