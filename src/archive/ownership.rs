//! Owner and group applied to tar members.
//!
//! Names are resolved through the system user and group databases. This
//! is best-effort: an unknown name leaves members with their on-disk ids,
//! and setting a group other than the caller's may not survive extraction
//! without elevated privileges.

use crate::diagnostics::{Diagnostics, Source};

/// Resolved ownership override for archive members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ownership {
    pub uid: Option<u64>,
    pub owner: Option<String>,
    pub gid: Option<u64>,
    pub group: Option<String>,
}

impl Ownership {
    /// Resolve `owner` and `group` names (or numeric ids).
    pub fn resolve(owner: Option<&str>, group: Option<&str>, diagnostics: &mut Diagnostics) -> Self {
        let mut ownership = Self::default();

        if let Some(owner) = owner {
            match owner.parse::<u64>().ok().or_else(|| lookup_uid(owner)) {
                Some(uid) => {
                    ownership.uid = Some(uid);
                    ownership.owner = Some(owner.to_string());
                }
                None => diagnostics.warn(
                    Source::Archive,
                    format!("unknown owner '{}', keeping file ownership", owner),
                ),
            }
        }

        if let Some(group) = group {
            match group.parse::<u64>().ok().or_else(|| lookup_gid(group)) {
                Some(gid) => {
                    ownership.gid = Some(gid);
                    ownership.group = Some(group.to_string());
                }
                None => diagnostics.warn(
                    Source::Archive,
                    format!("unknown group '{}', keeping file ownership", group),
                ),
            }
        }

        ownership
    }

    /// Apply the override to a tar header.
    pub fn apply(&self, header: &mut tar::Header) -> std::io::Result<()> {
        if let Some(uid) = self.uid {
            header.set_uid(uid);
            if let Some(owner) = self.owner.as_deref().filter(|o| o.parse::<u64>().is_err()) {
                header.set_username(owner)?;
            }
        }
        if let Some(gid) = self.gid {
            header.set_gid(gid);
            if let Some(group) = self.group.as_deref().filter(|g| g.parse::<u64>().is_err()) {
                header.set_groupname(group)?;
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn lookup_uid(name: &str) -> Option<u64> {
    let name = std::ffi::CString::new(name).ok()?;
    // SAFETY: getpwnam receives a valid NUL-terminated string; the returned
    // record is only read before any other passwd call on this thread.
    unsafe {
        let pw = libc::getpwnam(name.as_ptr());
        if pw.is_null() {
            None
        } else {
            Some(u64::from((*pw).pw_uid))
        }
    }
}

#[cfg(unix)]
fn lookup_gid(name: &str) -> Option<u64> {
    let name = std::ffi::CString::new(name).ok()?;
    // SAFETY: as for getpwnam above.
    unsafe {
        let gr = libc::getgrnam(name.as_ptr());
        if gr.is_null() {
            None
        } else {
            Some(u64::from((*gr).gr_gid))
        }
    }
}

#[cfg(not(unix))]
fn lookup_uid(_name: &str) -> Option<u64> {
    None
}

#[cfg(not(unix))]
fn lookup_gid(_name: &str) -> Option<u64> {
    None
}
