//! Distribution name and version normalization.
//!
//! Archive and directory names use a filesystem-safe form of the project
//! name and a PEP 440 normalized version: `ns.fake--pkg` 1.0 becomes
//! `ns_fake_pkg-1.0`.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of separator characters collapsed by name normalization.
static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("NAME_SEPARATORS must compile"));

/// Characters that cannot appear in a fallback version string.
static UNSAFE_VERSION_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9.]+").expect("UNSAFE_VERSION_CHARS must compile"));

/// PEP 440 version grammar.
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?P<pre>
            [-_.]?
            (?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)
            [-_.]?
            (?P<pre_n>[0-9]+)?
        )?
        (?P<post>
            (?:-(?P<post_n1>[0-9]+))
            |
            (?:
                [-_.]?
                (?P<post_l>post|rev|r)
                [-_.]?
                (?P<post_n2>[0-9]+)?
            )
        )?
        (?P<dev>
            [-_.]?
            (?P<dev_l>dev)
            [-_.]?
            (?P<dev_n>[0-9]+)?
        )?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .expect("VERSION_PATTERN must compile")
});

/// Placeholder name for projects that do not declare one.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Placeholder version for projects that do not declare one.
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// Normalize a project name for file names: lowercase, separator runs to `_`.
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(name.trim(), "_")
        .to_lowercase()
}

/// Normalize a version string.
///
/// Valid PEP 440 versions are rendered canonically (trailing zeros kept);
/// anything else has unsafe character runs replaced by `_`.
pub fn normalize_version(version: &str) -> String {
    canonical_version(version)
        .unwrap_or_else(|| UNSAFE_VERSION_CHARS.replace_all(version.trim(), "_").into_owned())
}

/// Canonical PEP 440 rendering, or `None` if `version` is not PEP 440.
pub fn canonical_version(version: &str) -> Option<String> {
    let caps = VERSION_PATTERN.captures(version)?;
    let number = |name: &str| -> Option<u64> { caps.name(name).and_then(|m| m.as_str().parse().ok()) };

    let mut out = String::new();

    if let Some(epoch) = number("epoch").filter(|e| *e != 0) {
        out.push_str(&format!("{}!", epoch));
    }

    let release: Vec<String> = caps["release"]
        .split('.')
        .map(|part| part.parse::<u64>().map(|n| n.to_string()).unwrap_or_else(|_| part.to_string()))
        .collect();
    out.push_str(&release.join("."));

    if let Some(label) = caps.name("pre_l") {
        let label = match label.as_str().to_lowercase().as_str() {
            "alpha" | "a" => "a",
            "beta" | "b" => "b",
            _ => "rc",
        };
        out.push_str(&format!("{}{}", label, number("pre_n").unwrap_or(0)));
    }

    if caps.name("post").is_some() {
        let n = number("post_n1").or_else(|| number("post_n2")).unwrap_or(0);
        out.push_str(&format!(".post{}", n));
    }

    if caps.name("dev").is_some() {
        out.push_str(&format!(".dev{}", number("dev_n").unwrap_or(0)));
    }

    if let Some(local) = caps.name("local") {
        let local = NAME_SEPARATORS.replace_all(local.as_str(), ".").to_lowercase();
        out.push_str(&format!("+{}", local));
    }

    Some(out)
}

/// `<normalized-name>-<normalized-version>`, the archive base name.
pub fn fullname(name: Option<&str>, version: Option<&str>) -> String {
    format!(
        "{}-{}",
        normalize_name(name.filter(|n| !n.trim().is_empty()).unwrap_or(UNKNOWN_NAME)),
        normalize_version(version.filter(|v| !v.trim().is_empty()).unwrap_or(UNKNOWN_VERSION))
    )
}
