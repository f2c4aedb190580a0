//! `sdist` command options and their finalization.

use std::path::{Path, PathBuf};

use crate::archive::ArchiveFormat;
use crate::config::{OptionValue, SdistSettings};
use crate::error::{Result, SrcpackError};

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "MANIFEST";

/// Default manifest template file name.
pub const DEFAULT_TEMPLATE: &str = "MANIFEST.in";

/// Default output directory.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Raw options as set by the project file or the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SdistOptions {
    pub formats: Option<OptionValue>,
    pub manifest: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub dist_dir: Option<PathBuf>,
    pub use_defaults: bool,
    pub prune: bool,
    pub metadata_check: bool,
    pub manifest_only: bool,
    pub owner: Option<String>,
    pub group: Option<String>,
}

impl Default for SdistOptions {
    fn default() -> Self {
        Self {
            formats: None,
            manifest: None,
            template: None,
            dist_dir: None,
            use_defaults: true,
            prune: true,
            metadata_check: true,
            manifest_only: false,
            owner: None,
            group: None,
        }
    }
}

impl From<&SdistSettings> for SdistOptions {
    fn from(settings: &SdistSettings) -> Self {
        let defaults = Self::default();
        Self {
            formats: settings.formats.clone(),
            manifest: settings.manifest.clone(),
            template: settings.template.clone(),
            dist_dir: settings.dist_dir.clone(),
            use_defaults: settings.use_defaults.unwrap_or(defaults.use_defaults),
            prune: settings.prune.unwrap_or(defaults.prune),
            metadata_check: settings.metadata_check.unwrap_or(defaults.metadata_check),
            manifest_only: settings.manifest_only.unwrap_or(defaults.manifest_only),
            owner: settings.owner.clone(),
            group: settings.group.clone(),
        }
    }
}

/// Validated options with every default applied and paths made absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedOptions {
    pub formats: Vec<ArchiveFormat>,
    pub manifest: PathBuf,
    pub template: PathBuf,
    pub dist_dir: PathBuf,
    pub use_defaults: bool,
    pub prune: bool,
    pub metadata_check: bool,
    pub manifest_only: bool,
    pub owner: Option<String>,
    pub group: Option<String>,
}

impl SdistOptions {
    /// Validate the options and fill in defaults relative to `root`.
    pub fn finalize(&self, root: &Path) -> Result<FinalizedOptions> {
        let formats = parse_formats(self.formats.as_ref())?;
        let resolve = |path: &Option<PathBuf>, default: &str| {
            let path = path.clone().unwrap_or_else(|| PathBuf::from(default));
            if path.is_absolute() {
                path
            } else {
                root.join(path)
            }
        };

        Ok(FinalizedOptions {
            formats,
            manifest: resolve(&self.manifest, DEFAULT_MANIFEST),
            template: resolve(&self.template, DEFAULT_TEMPLATE),
            dist_dir: resolve(&self.dist_dir, DEFAULT_DIST_DIR),
            use_defaults: self.use_defaults,
            prune: self.prune,
            metadata_check: self.metadata_check,
            manifest_only: self.manifest_only,
            owner: self.owner.clone().filter(|o| !o.is_empty()),
            group: self.group.clone().filter(|g| !g.is_empty()),
        })
    }
}

/// Parse the `formats` option.
///
/// Accepts a single name, a space or comma separated string of names, or a
/// list of names. Unset means `gztar`.
pub fn parse_formats(value: Option<&OptionValue>) -> Result<Vec<ArchiveFormat>> {
    let names: Vec<String> = match value {
        None => return Ok(vec![ArchiveFormat::GzTar]),
        Some(OptionValue::Text(text)) => text
            .split([' ', ','])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(OptionValue::List(list)) => list.clone(),
        Some(other) => {
            return Err(SrcpackError::option(
                "formats",
                format!("'{}' must be a list of strings", display_value(other)),
            ))
        }
    };

    if names.is_empty() {
        return Ok(vec![ArchiveFormat::GzTar]);
    }

    let mut formats = Vec::with_capacity(names.len());
    for name in &names {
        let format = name.parse::<ArchiveFormat>().map_err(|_| {
            SrcpackError::option("formats", format!("unknown archive format '{}'", name))
        })?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    Ok(formats)
}

fn display_value(value: &OptionValue) -> String {
    match value {
        OptionValue::Bool(b) => b.to_string(),
        OptionValue::Integer(i) => i.to_string(),
        OptionValue::Text(s) => s.clone(),
        OptionValue::List(list) => list.join(", "),
    }
}
