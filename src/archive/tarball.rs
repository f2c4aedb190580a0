//! Tar archive writing.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::{Builder, EntryType, Header};

use super::layout::{ArchiveLayout, EntrySource};
use super::ownership::Ownership;

/// Compression wrapped around the tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TarCompression {
    None,
    Gzip,
    Zstd,
}

/// Write `layout` as a tar archive at `path`.
pub fn write_tarball(
    path: &Path,
    layout: &ArchiveLayout,
    compression: TarCompression,
    ownership: &Ownership,
) -> io::Result<()> {
    let file = File::create(path)?;

    match compression {
        TarCompression::None => {
            let mut builder = Builder::new(file);
            append_entries(&mut builder, layout, ownership)?;
            builder.into_inner()?.flush()?;
        }
        TarCompression::Gzip => {
            let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
            append_entries(&mut builder, layout, ownership)?;
            builder.into_inner()?.finish()?;
        }
        TarCompression::Zstd => {
            let mut builder = Builder::new(zstd::Encoder::new(file, 0)?);
            append_entries(&mut builder, layout, ownership)?;
            builder.into_inner()?.finish()?;
        }
    }

    Ok(())
}

fn append_entries<W: Write>(
    builder: &mut Builder<W>,
    layout: &ArchiveLayout,
    ownership: &Ownership,
) -> io::Result<()> {
    for entry in &layout.entries {
        let mut header = Header::new_gnu();

        match &entry.source {
            EntrySource::Directory(source) => {
                header.set_metadata(&fs::metadata(source)?);
                header.set_entry_type(EntryType::Directory);
                header.set_size(0);
                ownership.apply(&mut header)?;
                builder.append_data(&mut header, &entry.name, io::empty())?;
            }
            EntrySource::File(source) => {
                header.set_metadata(&fs::metadata(source)?);
                ownership.apply(&mut header)?;
                builder.append_data(&mut header, &entry.name, File::open(source)?)?;
            }
            EntrySource::Generated { data, like } => {
                header.set_metadata(&fs::metadata(like)?);
                header.set_entry_type(EntryType::Regular);
                header.set_mode(0o644);
                header.set_size(data.len() as u64);
                ownership.apply(&mut header)?;
                builder.append_data(&mut header, &entry.name, data.as_slice())?;
            }
        }
    }
    Ok(())
}
