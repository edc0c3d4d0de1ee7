use pkglog_store::Journal;
use pkglog_types::{PackageInfo, Transaction};

/// One package manager integration.
///
/// The trait carries only the required capability set; conveniences
/// like [`is_installed`] are free functions built on top of it.
pub trait PackageBackend: Send + Sync {
    /// Registry name (lowercase), also the `manager` field on events.
    fn name(&self) -> &'static str;

    /// Whether the underlying package manager is present on this host.
    /// Pure probe, no side effects.
    fn is_available(&self) -> bool;

    /// Enumerate currently installed packages. Any subprocess or parse
    /// failure yields an empty list with a logged error, never a panic
    /// or propagated error.
    fn list_installed(&self) -> Vec<PackageInfo>;

    /// Convert a transaction's install/remove facts into events and
    /// record them. Returns false when the backend cannot intercept
    /// transactions natively (those managers rely on an external hook
    /// invoking the CLI).
    fn register_transaction(&self, tx: &Transaction, journal: &Journal) -> bool;
}

/// Whether `name` appears in the backend's installed enumeration.
pub fn is_installed(backend: &dyn PackageBackend, name: &str) -> bool {
    backend.list_installed().iter().any(|p| p.name == name)
}

/// Find a single installed package by exact name.
pub fn find_package(backend: &dyn PackageBackend, name: &str) -> Option<PackageInfo> {
    backend.list_installed().into_iter().find(|p| p.name == name)
}
