//! C toolchain discovery.
//!
//! - [`types`] - known compiler families and the platform default
//! - [`descriptor`] - executable commands per family and environment customization
//! - [`probe`] - `PATH` lookups reporting the first missing executable

pub mod descriptor;
pub mod probe;
pub mod types;

pub use descriptor::{split_quoted, CompilerDescriptor, ExecutableRole, CUSTOMIZE_VARS};
pub use probe::{
    find_missing_executable, find_missing_executable_with_env, initialize_msvc, parse_system_path,
    resolve_executable,
};
pub use types::{possible_compiler_types, CompilerType};
