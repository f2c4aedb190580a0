//! Package index credentials from `~/.pypirc`.
//!
//! The file is INI formatted. The modern layout names index servers in a
//! `[distutils]` section and gives each server its own section:
//!
//! ```text
//! [distutils]
//! index-servers =
//!     pypi
//!     internal
//!
//! [internal]
//! repository: https://pkgs.example.com/
//! username: ci
//! password: secret
//! ```
//!
//! The legacy layout has a single `[server-login]` section.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SrcpackError};

/// Upload endpoint used when a server does not name one.
pub const DEFAULT_REPOSITORY: &str = "https://upload.pypi.org/legacy/";

/// File name of the per-user configuration, in the home directory.
pub const PYPIRC_FILE: &str = ".pypirc";

/// Authentication realm used when a server does not name one.
pub const DEFAULT_REALM: &str = "pypi";

/// Resolved settings for one index server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Section name of the server.
    pub server: String,
    pub username: String,
    pub password: Option<String>,
    /// Upload URL.
    pub repository: String,
    pub realm: String,
}

impl RepositoryConfig {
    /// Password with every character replaced, for display.
    pub fn masked_password(&self) -> Option<String> {
        self.password.as_ref().map(|p| "*".repeat(p.chars().count().max(8)))
    }
}

/// Parsed INI sections, keys lowercased.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniDocument {
    /// Parse INI text.
    ///
    /// Supports `key = value` and `key: value`, `#`/`;` comment lines, and
    /// indented continuation lines that extend the previous value.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut doc = Self::default();
        let mut section: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (idx, raw) in content.lines().enumerate() {
            let number = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if raw.starts_with(char::is_whitespace) {
                if let (Some(sec), Some(key)) = (&section, &last_key) {
                    if let Some(value) = doc.sections.get_mut(sec).and_then(|s| s.get_mut(key)) {
                        value.push('\n');
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                let name = name.trim().to_string();
                doc.sections.entry(name.clone()).or_default();
                section = Some(name);
                last_key = None;
                continue;
            }

            let sec = section
                .as_ref()
                .ok_or_else(|| format!("line {}: option outside of a section", number))?;

            let split = trimmed
                .find(['=', ':'])
                .ok_or_else(|| format!("line {}: expected 'key = value'", number))?;
            let key = trimmed[..split].trim().to_lowercase();
            let value = trimmed[split + 1..].trim().to_string();

            doc.sections
                .entry(sec.clone())
                .or_default()
                .insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(doc)
    }

    /// Whether a section exists.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Look up an option value.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }
}

/// Handle on a `.pypirc` file.
#[derive(Debug, Clone)]
pub struct Pypirc {
    path: PathBuf,
}

impl Pypirc {
    /// Use the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user file, `~/.pypirc`.
    pub fn user_default() -> Option<Self> {
        Some(Self::new(dirs::home_dir()?.join(PYPIRC_FILE)))
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the server matching `repository` (a section name or URL).
    ///
    /// Returns `None` when the file is missing or no server matches.
    pub fn read(&self, repository: Option<&str>) -> Result<Option<RepositoryConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }

        tracing::info!("Using index credentials from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        let doc = IniDocument::parse(&content).map_err(|message| self.invalid(message))?;
        let repository = repository.unwrap_or(DEFAULT_REPOSITORY);

        if doc.has_section("distutils") {
            self.read_index_servers(&doc, repository)
        } else if doc.has_section("server-login") {
            self.read_server_login(&doc).map(Some)
        } else {
            Ok(None)
        }
    }

    fn read_index_servers(
        &self,
        doc: &IniDocument,
        repository: &str,
    ) -> Result<Option<RepositoryConfig>> {
        let mut servers: Vec<String> = doc
            .get("distutils", "index-servers")
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if servers.is_empty() {
            if doc.has_section("pypi") {
                servers.push("pypi".to_string());
            } else {
                return Ok(None);
            }
        }

        for server in servers {
            let username = doc
                .get(&server, "username")
                .ok_or_else(|| self.invalid(format!("no username for server '{}'", server)))?;

            let mut current = RepositoryConfig {
                server: server.clone(),
                username: username.to_string(),
                password: doc.get(&server, "password").map(str::to_string),
                repository: doc
                    .get(&server, "repository")
                    .unwrap_or(DEFAULT_REPOSITORY)
                    .to_string(),
                realm: doc.get(&server, "realm").unwrap_or(DEFAULT_REALM).to_string(),
            };

            // Older files point the pypi section at a stale URL.
            if server == "pypi" && (repository == DEFAULT_REPOSITORY || repository == "pypi") {
                current.repository = DEFAULT_REPOSITORY.to_string();
                return Ok(Some(current));
            }

            if current.server == repository || current.repository == repository {
                return Ok(Some(current));
            }
        }

        Ok(None)
    }

    fn read_server_login(&self, doc: &IniDocument) -> Result<RepositoryConfig> {
        let section = "server-login";
        let username = doc
            .get(section, "username")
            .ok_or_else(|| self.invalid("no username in [server-login]"))?;
        let password = doc
            .get(section, "password")
            .ok_or_else(|| self.invalid("no password in [server-login]"))?;

        Ok(RepositoryConfig {
            server: section.to_string(),
            username: username.to_string(),
            password: Some(password.to_string()),
            repository: doc
                .get(section, "repository")
                .unwrap_or(DEFAULT_REPOSITORY)
                .to_string(),
            realm: DEFAULT_REALM.to_string(),
        })
    }

    /// Write a default file holding pypi credentials, readable only by the owner.
    pub fn store(&self, username: &str, password: &str) -> Result<()> {
        let content = format!(
            "[distutils]\nindex-servers =\n    pypi\n\n[pypi]\nusername:{}\npassword:{}\n",
            username, password
        );

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(content.as_bytes())?;
        tracing::info!("stored credentials in {}", self.path.display());
        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> SrcpackError {
        SrcpackError::RepositoryConfig {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}
