//! Distribution archive writing.
//!
//! An [`ArchiveLayout`] lists the members of a release tree; each
//! [`ArchiveFormat`] knows how to serialize it. Every written archive is
//! reported with its SHA-256 digest.

mod format;
mod layout;
mod ownership;
mod tarball;
mod zipfile;

pub use format::{show_formats, ArchiveFormat};
pub use layout::{ArchiveEntry, ArchiveLayout, EntrySource};
pub use ownership::Ownership;
pub use tarball::{write_tarball, TarCompression};
pub use zipfile::write_zipfile;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Result, SrcpackError};

/// An archive written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveArtifact {
    pub format: ArchiveFormat,
    pub path: PathBuf,
    pub sha256: String,
}

/// Write `layout` to `dist_dir` in `format`.
///
/// The file is named after the layout's base directory. Ownership is only
/// applied by formats that record it.
pub fn make_archive(
    format: ArchiveFormat,
    dist_dir: &Path,
    layout: &ArchiveLayout,
    ownership: &Ownership,
) -> Result<ArchiveArtifact> {
    fs::create_dir_all(dist_dir)?;
    let path = dist_dir.join(format!("{}{}", layout.base_dir, format.extension()));

    tracing::debug!(format = %format, path = %path.display(), "writing archive");

    let written = match format {
        ArchiveFormat::Zip => write_zipfile(&path, layout).map_err(|e| e.to_string()),
        ArchiveFormat::Tar => write_tarball(&path, layout, TarCompression::None, ownership).map_err(|e| e.to_string()),
        ArchiveFormat::GzTar => write_tarball(&path, layout, TarCompression::Gzip, ownership).map_err(|e| e.to_string()),
        ArchiveFormat::ZstdTar => write_tarball(&path, layout, TarCompression::Zstd, ownership).map_err(|e| e.to_string()),
    };

    if let Err(message) = written {
        let _ = fs::remove_file(&path);
        return Err(SrcpackError::Archive {
            format: format.name().to_string(),
            path,
            message,
        });
    }

    let sha256 = sha256_file(&path)?;
    tracing::info!(path = %path.display(), %sha256, "archive written");

    Ok(ArchiveArtifact { format, path, sha256 })
}

/// Hex-encoded SHA-256 digest of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    io::copy(&mut File::open(path)?, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
