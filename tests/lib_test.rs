//! Tests for the public library API.

use std::fs;
use std::path::PathBuf;

use srcpack::compiler::{find_missing_executable_with_env, possible_compiler_types, CompilerType};
use srcpack::config::{load_project, Pypirc, DEFAULT_REPOSITORY};
use srcpack::metadata::{fullname, normalize_version};
use srcpack::SrcpackError;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn possible_compiler_types_are_known_names() {
    let types = possible_compiler_types();
    assert!(!types.is_empty());
    for ty in types {
        assert_eq!(ty.name().parse::<CompilerType>().unwrap(), ty);
    }
}

#[cfg(not(windows))]
#[test]
fn msvc_missing_off_windows() {
    let missing = find_missing_executable_with_env(&[], Some("msvc"), no_env, &[]).unwrap();
    assert_eq!(missing.as_deref(), Some("msvc"));
}

#[test]
fn unknown_compiler_type_errors() {
    let err = find_missing_executable_with_env(&[], Some("tcc"), no_env, &[]).unwrap_err();
    assert!(matches!(err, SrcpackError::UnknownCompiler { .. }));
}

#[cfg(unix)]
#[test]
fn unix_toolchain_found_on_custom_path() {
    use std::os::unix::fs::PermissionsExt;

    let bin = TempDir::new().unwrap();
    for tool in ["cc", "c++", "ar", "ranlib"] {
        let path = bin.path().join(tool);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    let path: Vec<PathBuf> = vec![bin.path().to_path_buf()];

    assert_eq!(
        find_missing_executable_with_env(&[], Some("unix"), no_env, &path).unwrap(),
        None
    );
    assert_eq!(
        find_missing_executable_with_env(&[], Some("unix"), no_env, &[]).unwrap().as_deref(),
        Some("cc")
    );
}

#[test]
fn fullname_normalizes_name_and_version() {
    assert_eq!(fullname(Some("Fake.Pkg"), Some("1.0.0")), "fake_pkg-1.0.0");
    assert_eq!(normalize_version("1.0beta2"), "1.0b2");
}

#[test]
fn load_project_reads_srcpack_yml() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("srcpack.yml"),
        "name: demo\nversion: '1.0'\npackages: [demo]\nsdist:\n  formats: zip\n  prune: false\n",
    )
    .unwrap();

    let project = load_project(temp.path()).unwrap();
    assert_eq!(project.metadata.name.as_deref(), Some("demo"));
    assert_eq!(project.packages, vec!["demo"]);
    assert_eq!(project.sdist.prune, Some(false));
}

#[test]
fn load_project_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = load_project(temp.path()).unwrap_err();
    assert!(matches!(err, SrcpackError::ProjectNotFound { .. }));
}

#[test]
fn pypirc_store_then_read() {
    let temp = TempDir::new().unwrap();
    let pypirc = Pypirc::new(temp.path().join(".pypirc"));
    assert!(pypirc.read(None).unwrap().is_none());

    pypirc.store("tarek", "xxx").unwrap();
    let config = pypirc.read(None).unwrap().unwrap();
    assert_eq!(config.server, "pypi");
    assert_eq!(config.username, "tarek");
    assert_eq!(config.password.as_deref(), Some("xxx"));
    assert_eq!(config.repository, DEFAULT_REPOSITORY);
}
