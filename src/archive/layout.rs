//! Archive member planning.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Where a member's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// A directory; the path supplies its metadata.
    Directory(PathBuf),
    /// A file copied from disk.
    File(PathBuf),
    /// Generated content; the path supplies ownership and timestamps.
    Generated { data: Vec<u8>, like: PathBuf },
}

/// One member of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/`-separated, without trailing slash.
    pub name: String,
    pub source: EntrySource,
}

impl ArchiveEntry {
    /// Whether this member is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self.source, EntrySource::Directory(_))
    }
}

/// Every member of a distribution archive, in write order.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    /// Top-level directory all members live under.
    pub base_dir: String,
    pub entries: Vec<ArchiveEntry>,
}

impl ArchiveLayout {
    /// Plan members for `files` (relative to `root`) under `base_dir`.
    ///
    /// The layout starts with the base directory and the generated files,
    /// then lists each file preceded by any of its directories not yet
    /// emitted.
    pub fn plan(root: &Path, base_dir: &str, files: &[String], generated: Vec<(String, Vec<u8>)>) -> Self {
        let mut entries = vec![ArchiveEntry {
            name: base_dir.to_string(),
            source: EntrySource::Directory(root.to_path_buf()),
        }];

        for (name, data) in generated {
            entries.push(ArchiveEntry {
                name: format!("{}/{}", base_dir, name),
                source: EntrySource::Generated {
                    data,
                    like: root.to_path_buf(),
                },
            });
        }

        let mut sorted: Vec<&String> = files.iter().collect();
        sorted.sort();

        let mut seen = BTreeSet::new();
        for file in sorted {
            let mut prefix = String::new();
            let components: Vec<&str> = file.split('/').collect();
            for dir in &components[..components.len().saturating_sub(1)] {
                if !prefix.is_empty() {
                    prefix.push('/');
                }
                prefix.push_str(dir);
                if seen.insert(prefix.clone()) {
                    let on_disk = root.join(&prefix);
                    let meta_source = if on_disk.is_dir() { on_disk } else { root.to_path_buf() };
                    entries.push(ArchiveEntry {
                        name: format!("{}/{}", base_dir, prefix),
                        source: EntrySource::Directory(meta_source),
                    });
                }
            }

            entries.push(ArchiveEntry {
                name: format!("{}/{}", base_dir, file),
                source: EntrySource::File(root.join(file)),
            });
        }

        Self {
            base_dir: base_dir.to_string(),
            entries,
        }
    }

    /// Member names, directories with a trailing `/`.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| if e.is_dir() { format!("{}/", e.name) } else { e.name.clone() })
            .collect()
    }
}
