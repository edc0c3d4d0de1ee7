use pkglog_types::Scope;
use std::path::PathBuf;
use tracing::warn;

/// Environment override for the storage root. Used by tests and by
/// deployments that relocate the log (takes priority for both scopes).
pub const DATA_DIR_ENV: &str = "PKGLOG_DATA_DIR";

const SYSTEM_DATA_DIR: &str = "/var/log/pkglog";

/// Effective scope plus the storage root and permission policy derived
/// from it. Pure decision data; the journal applies it during open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePolicy {
    pub scope: Scope,
    pub data_dir: PathBuf,
    /// Unix mode for the data directory (owner-only vs world-readable).
    pub dir_mode: u32,
    /// Unix mode for both store files.
    pub file_mode: u32,
}

impl ScopePolicy {
    /// Map a requested scope to the effective policy. System scope
    /// without privilege downgrades to user with a logged warning —
    /// the downgrade is observable, never silent data loss.
    pub fn resolve(requested: Scope, privileged: bool) -> Self {
        let effective = match requested {
            Scope::System if !privileged => {
                warn!(
                    "system scope requires administrative privileges; \
                     falling back to user scope"
                );
                Scope::User
            }
            other => other,
        };
        Self::for_scope(effective)
    }

    /// Policy for a scope that is already known to be effective.
    pub fn for_scope(scope: Scope) -> Self {
        match scope {
            Scope::User => Self {
                scope,
                data_dir: user_data_dir(),
                dir_mode: 0o700,
                file_mode: 0o600,
            },
            Scope::System => Self {
                scope,
                data_dir: system_data_dir(),
                dir_mode: 0o755,
                file_mode: 0o644,
            },
        }
    }

    /// Policy rooted at an explicit directory. Keeps the permission
    /// profile of the scope; used by tests and embedded callers.
    pub fn at(scope: Scope, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::for_scope(scope)
        }
    }
}

/// Resolve the per-user storage root:
/// 1. PKGLOG_DATA_DIR environment variable
/// 2. XDG data directory
/// 3. ~/.local/share/pkglog (fallback for systems without XDG)
fn user_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(data_dir) = dirs::data_dir() {
        return data_dir.join("pkglog");
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".local/share/pkglog");
    }
    // Last resort: relative to the working directory
    PathBuf::from(".pkglog")
}

fn system_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    PathBuf::from(SYSTEM_DATA_DIR)
}

/// Whether the current process may write system-scope storage.
#[cfg(unix)]
pub fn is_privileged() -> bool {
    // Safety: geteuid has no failure modes or side effects
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_privileged() -> bool {
    false
}
