//! Recoverable issue reporting.
//!
//! Problems that must not abort a command (malformed template lines, missing
//! standard files, incomplete metadata) are recorded as [`Diagnostic`]s in a
//! [`Diagnostics`] channel and handed back to the caller in the command
//! report.
//!
//! # Example
//!
//! ```
//! use srcpack::diagnostics::{Diagnostics, Severity, Source};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.warn(Source::Check, "missing required meta-data: name");
//!
//! assert_eq!(diagnostics.count(Severity::Warning, Source::Check), 1);
//! assert_eq!(
//!     diagnostics.iter().next().unwrap().to_string(),
//!     "warning: check: missing required meta-data: name"
//! );
//! ```

pub mod diagnostic;

pub use diagnostic::{Diagnostic, Diagnostics, Severity, Source};
