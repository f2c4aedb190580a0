//! Project file schema.
//!
//! This module contains the struct definitions that map to the
//! `srcpack.yml` project file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root structure of `srcpack.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Descriptive metadata written to `PKG-INFO`.
    #[serde(flatten)]
    pub metadata: Metadata,

    /// Packages (dotted names) whose modules are distributed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,

    /// Package name to directory mapping; `""` maps the root package.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub package_dir: BTreeMap<String, String>,

    /// Single-file modules (dotted names).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub py_modules: Vec<String>,

    /// Package name to glob patterns; `""` applies to every package.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub package_data: BTreeMap<String, Vec<String>>,

    /// Extra data files, bare paths or `[dir, [paths]]` groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_files: Vec<DataFile>,

    /// Script paths.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,

    /// Native extensions whose sources ship with the distribution.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionConfig>,

    /// Name of the setup script included as a standard file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_name: Option<String>,

    /// Options for the `sdist` command.
    pub sdist: SdistSettings,
}

impl ProjectConfig {
    /// The setup script name, defaulting to `setup.py`.
    pub fn script_name(&self) -> &str {
        self.script_name.as_deref().unwrap_or("setup.py")
    }
}

/// Core metadata fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// One-line summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub obsoletes: Vec<String>,
}

/// An entry in `data_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataFile {
    /// A single file installed to the data root.
    Path(String),
    /// Files installed into a directory.
    Group(String, Vec<String>),
}

/// A native extension module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Dotted module name.
    pub name: String,
    /// Source files.
    pub sources: Vec<String>,
    /// Additional files the build depends on.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,
}

/// A loosely typed option value, validated when a command is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// `sdist:` block of the project file. Unset values take command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SdistSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_defaults: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prune: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_project() {
        let yaml = r#"
name: ns.fake--pkg
version: "1.0"
url: xxx
author: xxx
author_email: xxx
packages: [somecode]
package_data:
  "": ["*.cfg", "*.dat"]
  somecode: ["*.txt"]
data_files:
  - [data, [data/data.dt, buildout.cfg, notexisting]]
  - some/file.txt
scripts: [scripts/script.py]
sdist:
  formats: [zip]
  dist_dir: out
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.metadata.name.as_deref(), Some("ns.fake--pkg"));
        assert_eq!(config.metadata.version.as_deref(), Some("1.0"));
        assert_eq!(config.packages, vec!["somecode"]);
        assert_eq!(config.package_data[""], vec!["*.cfg", "*.dat"]);
        assert_eq!(
            config.data_files[0],
            DataFile::Group(
                "data".into(),
                vec!["data/data.dt".into(), "buildout.cfg".into(), "notexisting".into()]
            )
        );
        assert_eq!(config.data_files[1], DataFile::Path("some/file.txt".into()));
        assert_eq!(config.sdist.formats, Some(OptionValue::List(vec!["zip".into()])));
        assert_eq!(config.sdist.dist_dir, Some(PathBuf::from("out")));
        assert_eq!(config.script_name(), "setup.py");
    }

    #[test]
    fn empty_project_uses_defaults() {
        let config: ProjectConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.metadata.name.is_none());
        assert!(config.packages.is_empty());
        assert!(config.sdist.formats.is_none());
    }

    #[test]
    fn formats_accepts_any_scalar_shape() {
        let settings: SdistSettings = serde_yaml::from_str("formats: 1").unwrap();
        assert_eq!(settings.formats, Some(OptionValue::Integer(1)));

        let settings: SdistSettings = serde_yaml::from_str("formats: gztar,zip").unwrap();
        assert_eq!(settings.formats, Some(OptionValue::Text("gztar,zip".into())));
    }

    #[test]
    fn option_value_conversions() {
        assert_eq!(OptionValue::from("zip"), OptionValue::Text("zip".into()));
        assert_eq!(
            OptionValue::from(vec!["gztar", "tar"]),
            OptionValue::List(vec!["gztar".into(), "tar".into()])
        );
        assert_eq!(OptionValue::from(3), OptionValue::Integer(3));
    }
}
