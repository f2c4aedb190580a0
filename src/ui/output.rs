//! Output verbosity.

/// How much a command prints besides its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also list manifest entries and informational notes.
    Verbose,
    #[default]
    Normal,
    /// Results and errors only: no header, spinner, warnings or hints.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the global `--verbose` / `--quiet` flags.
    /// `--quiet` wins when both are given.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Whether per-file details and notes are printed.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether progress, warnings and hints are printed.
    pub fn shows_progress(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
