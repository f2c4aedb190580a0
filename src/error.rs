//! Error types for srcpack operations.
//!
//! This module defines [`SrcpackError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SrcpackError` for failures that abort a command
//! - Recoverable problems (bad template lines, incomplete metadata) are not
//!   errors; they are reported through [`crate::diagnostics::Diagnostics`]
//! - Use `anyhow::Error` (via `SrcpackError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for srcpack operations.
#[derive(Debug, Error)]
pub enum SrcpackError {
    /// A command option has an invalid value.
    #[error("invalid value for option '{option}': {message}")]
    OptionError { option: String, message: String },

    /// An archive format name is not registered.
    #[error("unknown archive format '{name}'")]
    UnknownFormat { name: String },

    /// A command was run before its options were finalized.
    #[error("command '{command}' must be finalized before it can run")]
    NotFinalized { command: String },

    /// No project file was found at the expected location.
    #[error("Project file not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// The project file could not be parsed.
    #[error("Failed to parse project file at {path}: {message}")]
    ProjectParseError { path: PathBuf, message: String },

    /// A manifest template line could not be processed.
    #[error("{message}")]
    TemplateError { message: String },

    /// Writing an archive failed.
    #[error("failed to write {format} archive {path}: {message}")]
    Archive {
        format: String,
        path: PathBuf,
        message: String,
    },

    /// The requested compiler type is not known.
    #[error("don't know how to compile C/C++ code with compiler type '{name}'")]
    UnknownCompiler { name: String },

    /// The toolchain cannot be used on this platform.
    #[error("platform unsupported: {message}")]
    PlatformUnsupported { message: String },

    /// A compiler executable role was requested but has no command.
    #[error("the '{role}' executable is not configured")]
    ExecutableNotConfigured { role: String },

    /// The repository configuration file is malformed.
    #[error("Invalid repository configuration at {path}: {message}")]
    RepositoryConfig { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SrcpackError {
    /// Shorthand for an [`SrcpackError::OptionError`].
    pub fn option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OptionError {
            option: option.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for srcpack operations.
pub type Result<T> = std::result::Result<T, SrcpackError>;
