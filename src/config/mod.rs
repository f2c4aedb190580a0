//! Project configuration.
//!
//! - [`schema`] - the `srcpack.yml` project description
//! - [`loader`] - project file discovery and parsing
//! - [`pypirc`] - package index credentials
//!
//! # Example
//!
//! ```
//! use srcpack::config::{parse_project, DataFile};
//! use std::path::Path;
//!
//! let yaml = "name: demo\nversion: '1.0'\ndata_files:\n  - [etc, [conf/demo.cfg]]\n";
//! let project = parse_project(yaml, Path::new("srcpack.yml")).unwrap();
//! assert_eq!(project.metadata.name.as_deref(), Some("demo"));
//! assert!(matches!(project.data_files[0], DataFile::Group(..)));
//! ```

pub mod loader;
pub mod pypirc;
pub mod schema;

pub use loader::{
    find_project_file, find_project_root, load_project, load_project_file, parse_project,
    PROJECT_FILE,
};
pub use pypirc::{Pypirc, RepositoryConfig, DEFAULT_REALM, DEFAULT_REPOSITORY};
pub use schema::{
    DataFile, ExtensionConfig, Metadata, OptionValue, ProjectConfig, SdistSettings,
};
