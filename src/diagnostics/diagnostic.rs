//! Diagnostic messages and the collecting channel.

use std::fmt;

use serde::Serialize;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note, does not affect the outcome.
    Info,
    /// Warning that should be addressed.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The stage of a build that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Manifest template processing.
    Template,
    /// Reading or writing the manifest file.
    Manifest,
    /// Metadata completeness checks.
    Check,
    /// Default file discovery.
    Defaults,
    /// Archive assembly.
    Archive,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Template => "template",
            Source::Manifest => "manifest",
            Source::Check => "check",
            Source::Defaults => "defaults",
            Source::Archive => "archive",
        };
        write!(f, "{}", name)
    }
}

/// A single recorded issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Stage that produced it.
    pub source: Source,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(severity: Severity, source: Source, message: impl Into<String>) -> Self {
        Self {
            severity,
            source,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.source, self.message)
    }
}

/// Ordered collection of diagnostics produced during one command run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. It is traced at debug level; commands decide
    /// how to present it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            severity = %diagnostic.severity,
            source = %diagnostic.source,
            "{}",
            diagnostic.message
        );
        self.entries.push(diagnostic);
    }

    /// Record an informational note.
    pub fn info(&mut self, source: Source, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Info, source, message));
    }

    /// Record a warning.
    pub fn warn(&mut self, source: Source, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Warning, source, message));
    }

    /// Iterate over recorded diagnostics in order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics matching a severity and source.
    pub fn filter(&self, severity: Severity, source: Source) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == severity && d.source == source)
            .collect()
    }

    /// Count diagnostics matching a severity and source.
    pub fn count(&self, severity: Severity, source: Source) -> usize {
        self.filter(severity, source).len()
    }

    /// All warnings, regardless of source.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
