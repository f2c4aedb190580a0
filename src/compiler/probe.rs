//! Probe for missing toolchain executables.
//!
//! A descriptor is built for the requested compiler type, customized from
//! the environment, and the first word of each command is resolved against
//! `PATH`. Lookups walk `PATH` entries directly rather than shelling out
//! to `which`.
//!
//! # Example
//!
//! ```no_run
//! use srcpack::compiler::find_missing_executable;
//!
//! match find_missing_executable(&["compiler", "linker_so"], None)? {
//!     Some(missing) => println!("missing: {}", missing),
//!     None => println!("toolchain complete"),
//! }
//! # Ok::<(), srcpack::error::SrcpackError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Result, SrcpackError};

use super::descriptor::{CompilerDescriptor, ExecutableRole};
use super::types::CompilerType;

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a command to an executable file.
///
/// A command containing a path separator is checked as given; a bare name
/// is searched in `path_entries` in order.
pub fn resolve_executable(command: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let candidates = executable_names(command);

    if command.contains('/') || command.contains(std::path::MAIN_SEPARATOR) {
        return candidates
            .into_iter()
            .map(PathBuf::from)
            .find(|p| p.is_file() && is_executable(p));
    }

    for dir in path_entries {
        for name in &candidates {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn executable_names(command: &str) -> Vec<String> {
    if Path::new(command).extension().is_some() {
        vec![command.to_string()]
    } else {
        vec![command.to_string(), format!("{}.exe", command)]
    }
}

#[cfg(not(windows))]
fn executable_names(command: &str) -> Vec<String> {
    vec![command.to_string()]
}

/// Locate an MSVC toolchain.
///
/// Succeeds when a Visual Studio developer environment is active or
/// `cl.exe` is on `PATH`.
pub fn initialize_msvc<F>(env: &F, path_entries: &[PathBuf]) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if !cfg!(windows) {
        return Err(SrcpackError::PlatformUnsupported {
            message: "MSVC compilation is only supported on Windows".to_string(),
        });
    }
    if env("VCINSTALLDIR").is_some() || resolve_executable("cl.exe", path_entries).is_some() {
        return Ok(());
    }
    Err(SrcpackError::PlatformUnsupported {
        message: "Unable to find a compatible Visual Studio installation.".to_string(),
    })
}

/// Find the first missing executable using the real environment.
///
/// `names` restricts the check to the listed roles; empty checks every
/// configured role.
pub fn find_missing_executable(names: &[&str], compiler_type: Option<&str>) -> Result<Option<String>> {
    find_missing_executable_with_env(
        names,
        compiler_type,
        |key: &str| std::env::var(key).ok(),
        &parse_system_path(),
    )
}

/// Find the first missing executable with a custom environment and `PATH`.
pub fn find_missing_executable_with_env<F>(
    names: &[&str],
    compiler_type: Option<&str>,
    env: F,
    path_entries: &[PathBuf],
) -> Result<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let compiler_type = CompilerType::resolve(compiler_type)?;
    let mut descriptor = CompilerDescriptor::new(compiler_type);
    descriptor.customize(&env);

    if !descriptor.has_executables() {
        if let Err(e) = initialize_msvc(&env, path_entries) {
            match e {
                SrcpackError::PlatformUnsupported { message } => {
                    tracing::debug!(%message, "msvc unavailable");
                    return Ok(Some(CompilerType::Msvc.name().to_string()));
                }
                other => return Err(other),
            }
        }
    }

    for role in ExecutableRole::ALL {
        if !names.is_empty() && !names.contains(&role.name()) {
            continue;
        }

        let command = match descriptor.executable(*role) {
            Some(command) => command,
            None if names.is_empty() => continue,
            None => {
                return Err(SrcpackError::ExecutableNotConfigured {
                    role: role.name().to_string(),
                })
            }
        };

        let program = &command[0];
        if resolve_executable(program, path_entries).is_none() {
            tracing::debug!(role = %role, %program, "executable not found");
            return Ok(Some(program.clone()));
        }
    }

    Ok(None)
}
