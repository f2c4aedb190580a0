//! Manifest file reading and writing.
//!
//! A manifest lists one relative path per line. Manifests written by
//! srcpack start with [`MANIFEST_MARKER`]; a manifest without it was written
//! by hand and is treated as authoritative.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// First line of every generated manifest.
pub const MANIFEST_MARKER: &str = "# file GENERATED by distutils, do NOT edit";

/// Whether `path` holds a manifest that was not generated by srcpack.
///
/// A missing manifest counts as generated (there is nothing to preserve).
pub fn is_user_authored(path: &Path) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }

    let file = fs::File::open(path)?;
    let mut first = String::new();
    BufReader::new(file).read_line(&mut first)?;
    Ok(first.trim_end_matches(['\r', '\n']) != MANIFEST_MARKER)
}

/// Read the effective file list from a manifest.
///
/// Blank lines, comments and the marker line are skipped; remaining lines
/// are trimmed.
pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    tracing::info!("reading manifest file '{}'", path.display());
    let content = fs::read_to_string(path)?;
    Ok(parse_manifest(&content))
}

/// Parse manifest text into paths.
pub fn parse_manifest(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.replace('\\', "/"))
        .collect()
}

/// Render a generated manifest, marker first, using the native separator.
pub fn render_manifest(files: &[String]) -> String {
    let mut out = String::from(MANIFEST_MARKER);
    out.push('\n');
    for file in files {
        out.push_str(&native_path(file));
        out.push('\n');
    }
    out
}

/// Write a generated manifest for `files` to `path`.
pub fn write_manifest(path: &Path, files: &[String]) -> Result<()> {
    tracing::info!("writing manifest file '{}'", path.display());
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, render_manifest(files))?;
    Ok(())
}

fn native_path(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('/', std::path::MAIN_SEPARATOR_STR)
    }
}
