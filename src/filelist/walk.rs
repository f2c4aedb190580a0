//! Project tree traversal.

use std::path::Path;

use walkdir::WalkDir;

/// Convert a relative path into the `/`-separated form used by file lists.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// List every regular file below `root`, relative to it.
///
/// Symlinks are followed; entries that cannot be read (including symlink
/// loops) are skipped. Results are in directory-walk order with siblings
/// sorted by file name, so repeated walks of the same tree agree.
pub fn find_all(root: &Path) -> Vec<String> {
    let walk = WalkDir::new(root)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    let mut files = Vec::new();
    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Ok(rel) = entry.path().strip_prefix(root) {
            files.push(to_slash_path(rel));
        }
    }

    files
}
