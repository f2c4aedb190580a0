//! Known compiler types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SrcpackError;

/// A C/C++ toolchain family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerType {
    /// Standard Unix-style compiler (`cc`, `c++`, `ar`).
    Unix,
    /// Microsoft Visual C++.
    Msvc,
    /// Cygwin port of GNU C.
    Cygwin,
    /// MinGW32 port of GNU C.
    Mingw32,
    /// Borland C++.
    Bcpp,
}

impl CompilerType {
    pub const ALL: &'static [CompilerType] = &[
        CompilerType::Unix,
        CompilerType::Msvc,
        CompilerType::Cygwin,
        CompilerType::Mingw32,
        CompilerType::Bcpp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Msvc => "msvc",
            Self::Cygwin => "cygwin",
            Self::Mingw32 => "mingw32",
            Self::Bcpp => "bcpp",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Unix => "standard UNIX-style compiler",
            Self::Msvc => "Microsoft Visual C++",
            Self::Cygwin => "Cygwin port of GNU C Compiler for Win32",
            Self::Mingw32 => "Mingw32 port of GNU C Compiler for Win32",
            Self::Bcpp => "Borland C++ Compiler",
        }
    }

    /// Whether environment customization applies (GNU-style drivers).
    pub fn is_unix_family(&self) -> bool {
        matches!(self, Self::Unix | Self::Cygwin | Self::Mingw32)
    }

    /// Default compiler type for the host platform.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::Msvc
        } else {
            Self::Unix
        }
    }

    /// Resolve an optional name, falling back to the platform default.
    pub fn resolve(name: Option<&str>) -> Result<Self, SrcpackError> {
        match name {
            Some(name) => name.parse(),
            None => Ok(Self::platform_default()),
        }
    }
}

impl fmt::Display for CompilerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CompilerType {
    type Err = SrcpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| SrcpackError::UnknownCompiler { name: s.to_string() })
    }
}

/// Compiler types that could build extensions on this host.
pub fn possible_compiler_types() -> Vec<CompilerType> {
    let default = CompilerType::platform_default();
    let mut types = vec![default];
    if default == CompilerType::Msvc {
        types.push(CompilerType::Mingw32);
    }
    types
}
