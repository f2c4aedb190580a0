//! Registered archive formats.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SrcpackError;

/// An archive format a source distribution can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    /// ZIP file.
    Zip,
    /// Uncompressed tar file.
    Tar,
    /// Gzip-compressed tar file.
    GzTar,
    /// Zstandard-compressed tar file.
    ZstdTar,
}

impl ArchiveFormat {
    /// Every registered format, in listing order.
    pub const ALL: &'static [ArchiveFormat] = &[
        ArchiveFormat::GzTar,
        ArchiveFormat::Tar,
        ArchiveFormat::Zip,
        ArchiveFormat::ZstdTar,
    ];

    /// Name used on the command line and in project files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::GzTar => "gztar",
            Self::ZstdTar => "zstdtar",
        }
    }

    /// File extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => ".zip",
            Self::Tar => ".tar",
            Self::GzTar => ".tar.gz",
            Self::ZstdTar => ".tar.zst",
        }
    }

    /// One-line description for format listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Zip => "ZIP file",
            Self::Tar => "uncompressed tar file",
            Self::GzTar => "gzip'ed tar-file",
            Self::ZstdTar => "zstd-compressed tar-file",
        }
    }

    /// Whether members record an owner and group.
    pub fn supports_ownership(&self) -> bool {
        !matches!(self, Self::Zip)
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ArchiveFormat {
    type Err = SrcpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.name() == s)
            .ok_or_else(|| SrcpackError::UnknownFormat {
                name: s.to_string(),
            })
    }
}

/// Render the list of formats, one `--formats=` line each.
pub fn show_formats() -> String {
    let mut out = String::from("List of available source distribution formats:\n");
    for format in ArchiveFormat::ALL {
        out.push_str(&format!(
            "  {:<20} {}\n",
            format!("--formats={}", format.name()),
            format.description()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!("zip".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::Zip);
        assert_eq!("gztar".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::GzTar);
        assert_eq!("zstdtar".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::ZstdTar);
    }

    #[test]
    fn parse_unknown_name_fails() {
        let err = "supazipa".parse::<ArchiveFormat>().unwrap_err();
        assert!(matches!(err, SrcpackError::UnknownFormat { name } if name == "supazipa"));
    }

    #[test]
    fn names_round_trip() {
        for format in ArchiveFormat::ALL {
            assert_eq!(format.name().parse::<ArchiveFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn show_formats_lists_each_format_once() {
        let listing = show_formats();
        let lines: Vec<_> = listing
            .lines()
            .filter(|l| l.trim().starts_with("--formats="))
            .collect();
        assert_eq!(lines.len(), ArchiveFormat::ALL.len());
        assert!(listing.contains("--formats=zip"));
    }

    #[test]
    fn zip_has_no_ownership() {
        assert!(!ArchiveFormat::Zip.supports_ownership());
        assert!(ArchiveFormat::GzTar.supports_ownership());
    }
}
