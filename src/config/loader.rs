//! Project file discovery and loading.

use crate::config::schema::ProjectConfig;
use crate::error::{Result, SrcpackError};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the project description.
pub const PROJECT_FILE: &str = "srcpack.yml";

/// Find the project file directly inside `project_root`.
pub fn find_project_file(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(PROJECT_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// The first directory containing a project file wins.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(PROJECT_FILE).is_file() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single project file.
///
/// # Errors
///
/// Returns `ProjectNotFound` if the file doesn't exist.
/// Returns `ProjectParseError` if the YAML is invalid.
pub fn load_project_file(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() {
        return Err(SrcpackError::ProjectNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_project(&content, path)
}

/// Parse project YAML, attributing errors to `path`.
pub fn parse_project(content: &str, path: &Path) -> Result<ProjectConfig> {
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SrcpackError::ProjectParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project description for `project_root`.
pub fn load_project(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_FILE);
    let config = load_project_file(&path)?;
    tracing::debug!(
        "loaded project {:?} from {}",
        config.metadata.name,
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_project(temp.path()).unwrap_err();
        assert!(matches!(err, SrcpackError::ProjectNotFound { .. }));
    }

    #[test]
    fn load_invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_FILE), "name: [unclosed").unwrap();
        let err = load_project(temp.path()).unwrap_err();
        assert!(matches!(err, SrcpackError::ProjectParseError { .. }));
    }

    #[test]
    fn load_empty_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_FILE), "").unwrap();
        let config = load_project(temp.path()).unwrap();
        assert!(config.metadata.name.is_none());
    }

    #[test]
    fn load_valid_project() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_FILE),
            "name: demo\nversion: '0.1'\npackages: [demo]\n",
        )
        .unwrap();
        let config = load_project(temp.path()).unwrap();
        assert_eq!(config.metadata.name.as_deref(), Some("demo"));
        assert_eq!(config.packages, vec!["demo"]);
    }

    #[test]
    fn project_root_found_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_FILE), "").unwrap();
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
        assert_eq!(find_project_file(temp.path()), Some(temp.path().join(PROJECT_FILE)));
        assert!(find_project_file(&nested).is_none());
    }
}
