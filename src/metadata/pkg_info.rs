//! `PKG-INFO` rendering.

use crate::config::Metadata;

use super::normalize::{UNKNOWN_NAME, UNKNOWN_VERSION};

/// File name of the generated metadata file.
pub const PKG_INFO: &str = "PKG-INFO";

/// Metadata-Version to declare for `metadata`.
///
/// Classifiers, download URLs and dependency fields need 1.1.
pub fn metadata_version(metadata: &Metadata) -> &'static str {
    if !metadata.classifiers.is_empty()
        || metadata.download_url.is_some()
        || !metadata.requires.is_empty()
        || !metadata.provides.is_empty()
        || !metadata.obsoletes.is_empty()
    {
        "1.1"
    } else {
        "1.0"
    }
}

/// Render `PKG-INFO` contents. Unset optional fields are omitted.
pub fn render_pkg_info(metadata: &Metadata) -> String {
    let mut out = String::new();
    let mut field = |key: &str, value: &str| {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    };

    field("Metadata-Version", metadata_version(metadata));
    field("Name", non_empty(&metadata.name).unwrap_or(UNKNOWN_NAME));
    field("Version", non_empty(&metadata.version).unwrap_or(UNKNOWN_VERSION));

    let optional = [
        ("Summary", &metadata.description),
        ("Home-page", &metadata.url),
        ("Author", &metadata.author),
        ("Author-email", &metadata.author_email),
        ("Maintainer", &metadata.maintainer),
        ("Maintainer-email", &metadata.maintainer_email),
        ("License", &metadata.license),
        ("Download-URL", &metadata.download_url),
    ];
    for (key, value) in optional {
        if let Some(value) = non_empty(value) {
            field(key, value);
        }
    }

    if let Some(long) = non_empty(&metadata.long_description) {
        field("Description", &rfc822_escape(long));
    }

    if !metadata.keywords.is_empty() {
        field("Keywords", &metadata.keywords.join(","));
    }

    let repeated = [
        ("Platform", &metadata.platforms),
        ("Classifier", &metadata.classifiers),
        ("Requires", &metadata.requires),
        ("Provides", &metadata.provides),
        ("Obsoletes", &metadata.obsoletes),
    ];
    for (key, values) in repeated {
        for value in values {
            field(key, value);
        }
    }

    out
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Indent continuation lines so a multi-line value stays one header.
fn rfc822_escape(value: &str) -> String {
    value.lines().collect::<Vec<_>>().join(&format!("\n{}", " ".repeat(8)))
}
