//! Metadata completeness checks.

use crate::config::Metadata;
use crate::diagnostics::{Diagnostics, Source};

/// Fields every distribution must declare.
const REQUIRED_FIELDS: &[&str] = &["name", "version"];

/// Names of required fields that are missing or blank.
pub fn missing_required(metadata: &Metadata) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| {
            let value = match *field {
                "name" => &metadata.name,
                _ => &metadata.version,
            };
            value.as_deref().is_none_or(|v| v.trim().is_empty())
        })
        .collect()
}

/// Record one `check` warning when required metadata is missing.
///
/// Returns whether the metadata passed.
pub fn check_metadata(metadata: &Metadata, diagnostics: &mut Diagnostics) -> bool {
    let missing = missing_required(metadata);
    if missing.is_empty() {
        return true;
    }

    diagnostics.warn(
        Source::Check,
        format!("missing required meta-data: {}", missing.join(", ")),
    );
    false
}
