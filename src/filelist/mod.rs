//! File list computation.
//!
//! A [`FileList`] is the ordered set of relative paths that end up in a
//! source distribution. It is filled from default discovery and manifest
//! template directives, pruned, sorted, and finally written to the manifest.
//!
//! - [`pattern`] - shell glob to regex translation
//! - [`template`] - manifest template directives
//! - [`walk`] - project tree traversal

pub mod pattern;
pub mod template;
pub mod walk;

use std::path::{Path, PathBuf};

use regex::Regex;

pub use pattern::{glob_to_regex, translate_pattern};
pub use template::{read_template, TemplateAction};
pub use walk::{find_all, to_slash_path};

/// Directory names whose contents never belong in a distribution.
pub const VCS_DIRS: &[&str] = &["RCS", "CVS", ".svn", ".hg", ".git", ".bzr", "_darcs"];

/// Ordered list of files relative to a project root.
#[derive(Debug, Clone)]
pub struct FileList {
    root: PathBuf,
    files: Vec<String>,
    all_files: Option<Vec<String>>,
}

impl FileList {
    /// Create an empty list for the project at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
            all_files: None,
        }
    }

    /// Project root the paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current files, in list order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Consume the list, returning its files.
    pub fn into_files(self) -> Vec<String> {
        self.files
    }

    /// Append a single path.
    pub fn append(&mut self, path: impl Into<String>) {
        self.files.push(path.into());
    }

    /// Append several paths.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
    }

    /// Walk the project tree, caching every file for pattern directives.
    pub fn find_all(&mut self) -> &[String] {
        if self.all_files.is_none() {
            self.all_files = Some(walk::find_all(&self.root));
        }
        self.all_files.as_deref().unwrap_or_default()
    }

    /// Sort by `(directory, basename)`.
    ///
    /// Files at the root therefore sort before every file in a
    /// subdirectory, which keeps manifests stable and readable.
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| split_path(a).cmp(&split_path(b)));
    }

    /// Remove adjacent duplicates; call after [`FileList::sort`].
    pub fn remove_duplicates(&mut self) {
        self.files.dedup();
    }

    /// Add every walked file matching `re`. Returns whether any matched.
    pub fn include_matching(&mut self, re: &Regex) -> bool {
        let matched: Vec<String> = self
            .find_all()
            .iter()
            .filter(|f| re.is_match(f))
            .cloned()
            .collect();

        for path in &matched {
            tracing::debug!("adding {}", path);
        }
        let found = !matched.is_empty();
        self.files.extend(matched);
        found
    }

    /// Remove every listed file matching `re`. Returns whether any matched.
    pub fn exclude_matching(&mut self, re: &Regex) -> bool {
        let before = self.files.len();
        self.files.retain(|f| {
            let keep = !re.is_match(f);
            if !keep {
                tracing::debug!("removing {}", f);
            }
            keep
        });
        self.files.len() != before
    }
}

fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Regex matching any path inside a version-control directory.
pub fn vcs_pattern() -> String {
    let dirs: Vec<String> = VCS_DIRS.iter().map(|d| regex::escape(d)).collect();
    format!("(^|/)({})/", dirs.join("|"))
}

/// Regex matching NFS silly-rename files left behind by open deletions.
pub fn nfs_pattern() -> &'static str {
    r"(^|/)\.nfs[0-9A-Fa-f]+$"
}
