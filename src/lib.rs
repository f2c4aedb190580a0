//! srcpack - Build source distributions of Python-style projects.
//!
//! srcpack collects a project's source files from default heuristics and a
//! `MANIFEST.in` template, writes a `MANIFEST`, and packages everything
//! together with a generated `PKG-INFO` into zip and tar archives. It also
//! probes the host for the C toolchain executables an extension build needs.
//!
//! # Modules
//!
//! - [`archive`] - Archive formats and writers
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compiler`] - C toolchain discovery
//! - [`config`] - Project file and index credentials
//! - [`diagnostics`] - Recoverable issue reporting
//! - [`error`] - Error types and result aliases
//! - [`filelist`] - File lists, glob patterns and manifest templates
//! - [`manifest`] - `MANIFEST` reading and writing
//! - [`metadata`] - Name normalization, `PKG-INFO` and metadata checks
//! - [`sdist`] - The source distribution builder
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use srcpack::metadata::fullname;
//!
//! assert_eq!(fullname(Some("ns.fake--pkg"), Some("1.0")), "ns_fake_pkg-1.0");
//! assert_eq!(fullname(None, None), "unknown-0.0.0");
//! ```
//!
//! For building complete distributions, see the integration tests.

pub mod archive;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filelist;
pub mod manifest;
pub mod metadata;
pub mod sdist;
pub mod ui;

pub use error::{Result, SrcpackError};
