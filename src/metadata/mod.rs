//! Distribution metadata.
//!
//! - [`normalize`] - archive-safe names and PEP 440 versions
//! - [`pkg_info`] - the `PKG-INFO` file embedded in every archive
//! - [`check`] - required-field completeness checks

pub mod check;
pub mod normalize;
pub mod pkg_info;

pub use check::{check_metadata, missing_required};
pub use normalize::{fullname, normalize_name, normalize_version};
pub use pkg_info::{render_pkg_info, PKG_INFO};
