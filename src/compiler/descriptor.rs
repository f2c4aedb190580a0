//! Compiler descriptors and their executable commands.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::types::CompilerType;

/// A tool a compiler descriptor invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutableRole {
    Preprocessor,
    Compiler,
    CompilerSo,
    CompilerCxx,
    LinkerSo,
    LinkerExe,
    Archiver,
    Ranlib,
}

impl ExecutableRole {
    /// Every role, in probe order.
    pub const ALL: &'static [ExecutableRole] = &[
        ExecutableRole::Preprocessor,
        ExecutableRole::Compiler,
        ExecutableRole::CompilerSo,
        ExecutableRole::CompilerCxx,
        ExecutableRole::LinkerSo,
        ExecutableRole::LinkerExe,
        ExecutableRole::Archiver,
        ExecutableRole::Ranlib,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Preprocessor => "preprocessor",
            Self::Compiler => "compiler",
            Self::CompilerSo => "compiler_so",
            Self::CompilerCxx => "compiler_cxx",
            Self::LinkerSo => "linker_so",
            Self::LinkerExe => "linker_exe",
            Self::Archiver => "archiver",
            Self::Ranlib => "ranlib",
        }
    }
}

impl fmt::Display for ExecutableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Environment variables consulted when customizing Unix-family compilers.
pub const CUSTOMIZE_VARS: &[&str] = &[
    "CC", "CXX", "CPP", "LDSHARED", "LDCXXSHARED", "CFLAGS", "CPPFLAGS", "LDFLAGS", "AR",
    "ARFLAGS", "CCSHARED",
];

/// The executables a compiler type drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerDescriptor {
    compiler_type: CompilerType,
    executables: HashMap<ExecutableRole, Vec<String>>,
}

impl CompilerDescriptor {
    /// Descriptor with the built-in commands of `compiler_type`.
    ///
    /// `msvc` locates its tools at initialization and has no discrete
    /// executables.
    pub fn new(compiler_type: CompilerType) -> Self {
        use ExecutableRole::*;

        let commands: &[(ExecutableRole, &str)] = match compiler_type {
            CompilerType::Unix => &[
                (Compiler, "cc"),
                (CompilerSo, "cc"),
                (CompilerCxx, "c++"),
                (LinkerSo, "cc -shared"),
                (LinkerExe, "cc"),
                (Archiver, "ar -cr"),
            ],
            CompilerType::Cygwin => &[
                (Compiler, "gcc -mcygwin -O -Wall"),
                (CompilerSo, "gcc -mcygwin -mdll -O -Wall"),
                (CompilerCxx, "g++ -mcygwin -O -Wall"),
                (LinkerSo, "gcc -mcygwin -shared"),
                (LinkerExe, "gcc -mcygwin"),
                (Archiver, "ar -cr"),
            ],
            CompilerType::Mingw32 => &[
                (Compiler, "gcc -O -Wall"),
                (CompilerSo, "gcc -mdll -O -Wall"),
                (CompilerCxx, "g++ -O -Wall"),
                (LinkerSo, "gcc -shared"),
                (LinkerExe, "gcc"),
                (Archiver, "ar -cr"),
            ],
            CompilerType::Bcpp => &[
                (Compiler, "bcc32.exe"),
                (LinkerSo, "ilink32.exe"),
                (LinkerExe, "ilink32.exe"),
                (Archiver, "tlib.exe"),
            ],
            CompilerType::Msvc => &[],
        };

        let mut descriptor = Self {
            compiler_type,
            executables: HashMap::new(),
        };
        for (role, command) in commands {
            descriptor.set_executable(*role, command);
        }
        if compiler_type == CompilerType::Unix && cfg!(target_os = "macos") {
            descriptor.set_executable(Ranlib, "ranlib");
        }
        descriptor
    }

    pub fn compiler_type(&self) -> CompilerType {
        self.compiler_type
    }

    /// Whether the descriptor drives discrete executables at all.
    pub fn has_executables(&self) -> bool {
        self.compiler_type != CompilerType::Msvc
    }

    /// Command for `role`, if configured.
    pub fn executable(&self, role: ExecutableRole) -> Option<&[String]> {
        self.executables
            .get(&role)
            .map(Vec::as_slice)
            .filter(|cmd| !cmd.is_empty())
    }

    /// Set `role` from a command line, split on whitespace and quotes.
    pub fn set_executable(&mut self, role: ExecutableRole, command: &str) {
        self.executables.insert(role, split_quoted(command));
    }

    /// Apply environment overrides.
    ///
    /// Only Unix-family compilers are customized. `env` returns `None` for
    /// unset variables.
    pub fn customize<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.compiler_type.is_unix_family() {
            return;
        }

        let defaults = CompilerDescriptor::new(self.compiler_type);
        let default_of = |role: ExecutableRole, fallback: &str| {
            defaults
                .executable(role)
                .map(|cmd| cmd.join(" "))
                .unwrap_or_else(|| fallback.to_string())
        };

        let default_cc = default_of(ExecutableRole::Compiler, "cc");
        let default_ldshared = default_of(ExecutableRole::LinkerSo, "cc -shared");
        let cc = env("CC").unwrap_or_else(|| default_cc.clone());
        let cxx = env("CXX").unwrap_or_else(|| default_of(ExecutableRole::CompilerCxx, "c++"));
        let mut ldshared = match env("LDSHARED") {
            Some(ldshared) => ldshared,
            // A new CC also replaces the compiler the default linker runs.
            None => match (env("CC"), default_cc.split_whitespace().next()) {
                (Some(new_cc), Some(old_cc)) if default_ldshared.split_whitespace().next() == Some(old_cc) => {
                    format!("{}{}", new_cc, &default_ldshared[old_cc.len()..])
                }
                _ => default_ldshared,
            },
        };
        let mut ldcxxshared = env("LDCXXSHARED").unwrap_or_else(|| "c++ -shared".to_string());
        let mut cpp = env("CPP").unwrap_or_else(|| format!("{} -E", cc));
        let mut cflags = String::new();
        let ccshared = env("CCSHARED").unwrap_or_else(|| "-fPIC".to_string());

        if let Some(ldflags) = env("LDFLAGS") {
            ldshared = format!("{} {}", ldshared, ldflags);
            ldcxxshared = format!("{} {}", ldcxxshared, ldflags);
        }
        if let Some(extra) = env("CFLAGS") {
            cflags = format!("{} {}", cflags, extra);
            ldshared = format!("{} {}", ldshared, extra);
        }
        if let Some(extra) = env("CPPFLAGS") {
            cpp = format!("{} {}", cpp, extra);
            cflags = format!("{} {}", cflags, extra);
            ldshared = format!("{} {}", ldshared, extra);
        }

        let archiver = format!(
            "{} {}",
            env("AR").unwrap_or_else(|| "ar".to_string()),
            env("ARFLAGS").unwrap_or_else(|| "-cr".to_string())
        );
        let cc_cmd = format!("{} {}", cc, cflags);

        tracing::debug!(compiler = %cc_cmd, linker = %ldshared, "customized compiler");

        self.set_executable(ExecutableRole::Preprocessor, &cpp);
        self.set_executable(ExecutableRole::Compiler, &cc_cmd);
        self.set_executable(ExecutableRole::CompilerSo, &format!("{} {}", cc_cmd, ccshared));
        self.set_executable(ExecutableRole::CompilerCxx, &cxx);
        self.set_executable(ExecutableRole::LinkerSo, &ldshared);
        self.set_executable(ExecutableRole::LinkerExe, &cc);
        self.set_executable(ExecutableRole::Archiver, &archiver);
    }
}

/// Split a command line on whitespace, keeping quoted runs together.
pub fn split_quoted(command: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn split_quoted_handles_quotes_and_escapes() {
        assert_eq!(split_quoted("cc  -O2"), vec!["cc", "-O2"]);
        assert_eq!(split_quoted("'/opt/my cc/gcc' -c"), vec!["/opt/my cc/gcc", "-c"]);
        assert_eq!(split_quoted(r"a\ b c"), vec!["a b", "c"]);
        assert!(split_quoted("   ").is_empty());
    }

    #[test]
    fn msvc_has_no_executables() {
        let descriptor = CompilerDescriptor::new(CompilerType::Msvc);
        assert!(!descriptor.has_executables());
        assert!(ExecutableRole::ALL.iter().all(|r| descriptor.executable(*r).is_none()));
    }

    #[test]
    fn customize_with_empty_env_uses_defaults() {
        let mut descriptor = CompilerDescriptor::new(CompilerType::Unix);
        descriptor.customize(env_from(&[]));

        assert_eq!(descriptor.executable(ExecutableRole::Preprocessor).unwrap(), ["cc", "-E"]);
        assert_eq!(descriptor.executable(ExecutableRole::Compiler).unwrap(), ["cc"]);
        assert_eq!(descriptor.executable(ExecutableRole::CompilerSo).unwrap(), ["cc", "-fPIC"]);
        assert_eq!(descriptor.executable(ExecutableRole::CompilerCxx).unwrap(), ["c++"]);
        assert_eq!(descriptor.executable(ExecutableRole::LinkerSo).unwrap(), ["cc", "-shared"]);
        assert_eq!(descriptor.executable(ExecutableRole::Archiver).unwrap(), ["ar", "-cr"]);
    }

    #[test]
    fn customize_applies_environment() {
        let mut descriptor = CompilerDescriptor::new(CompilerType::Unix);
        descriptor.customize(env_from(&[
            ("CC", "clang"),
            ("CFLAGS", "-O3"),
            ("CPPFLAGS", "-Iinclude"),
            ("LDFLAGS", "-L/opt/lib"),
            ("AR", "llvm-ar"),
            ("ARFLAGS", "rcs"),
        ]));

        assert_eq!(
            descriptor.executable(ExecutableRole::Preprocessor).unwrap(),
            ["clang", "-E", "-Iinclude"]
        );
        assert_eq!(
            descriptor.executable(ExecutableRole::Compiler).unwrap(),
            ["clang", "-O3", "-Iinclude"]
        );
        assert_eq!(
            descriptor.executable(ExecutableRole::LinkerSo).unwrap(),
            ["clang", "-shared", "-L/opt/lib", "-O3", "-Iinclude"]
        );
        assert_eq!(descriptor.executable(ExecutableRole::LinkerExe).unwrap(), ["clang"]);
        assert_eq!(descriptor.executable(ExecutableRole::Archiver).unwrap(), ["llvm-ar", "rcs"]);
    }

    #[test]
    fn new_cc_replaces_default_linker_compiler() {
        let mut descriptor = CompilerDescriptor::new(CompilerType::Mingw32);
        descriptor.customize(env_from(&[("CC", "x86_64-w64-mingw32-gcc")]));
        assert_eq!(
            descriptor.executable(ExecutableRole::LinkerSo).unwrap(),
            ["x86_64-w64-mingw32-gcc", "-shared"]
        );
    }

    #[test]
    fn explicit_ldshared_is_kept_when_cc_changes() {
        let mut descriptor = CompilerDescriptor::new(CompilerType::Unix);
        descriptor.customize(env_from(&[("CC", "clang"), ("LDSHARED", "ld -shared")]));
        assert_eq!(descriptor.executable(ExecutableRole::LinkerSo).unwrap(), ["ld", "-shared"]);
        assert_eq!(descriptor.executable(ExecutableRole::Compiler).unwrap(), ["clang"]);
    }

    #[test]
    fn bcpp_ignores_environment() {
        let mut descriptor = CompilerDescriptor::new(CompilerType::Bcpp);
        descriptor.customize(env_from(&[("CC", "clang")]));
        assert_eq!(descriptor.executable(ExecutableRole::Compiler).unwrap(), ["bcc32.exe"]);
    }
}
