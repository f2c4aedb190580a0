//! Zip archive writing.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::layout::{ArchiveLayout, EntrySource};

/// Write `layout` as a zip archive at `path`.
///
/// Directory members end in `/`. Zip has no owner or group fields.
pub fn write_zipfile(path: &Path, layout: &ArchiveLayout) -> zip::result::ZipResult<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in &layout.entries {
        match &entry.source {
            EntrySource::Directory(_) => {
                zip.add_directory(format!("{}/", entry.name), options)?;
            }
            EntrySource::File(source) => {
                zip.start_file(entry.name.as_str(), options.unix_permissions(file_mode(source)?))?;
                io::copy(&mut File::open(source)?, &mut zip)?;
            }
            EntrySource::Generated { data, .. } => {
                zip.start_file(entry.name.as_str(), options.unix_permissions(0o644))?;
                zip.write_all(data)?;
            }
        }
    }

    zip.finish()?;
    Ok(())
}

#[cfg(unix)]
fn file_mode(path: &Path) -> io::Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(path: &Path) -> io::Result<u32> {
    let readonly = fs::metadata(path)?.permissions().readonly();
    Ok(if readonly { 0o444 } else { 0o644 })
}
