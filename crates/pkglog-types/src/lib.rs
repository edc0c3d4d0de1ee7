//! Core record types shared by the pkglog crates.
//!
//! The schema is intentionally flat: one [`Event`] per install/remove
//! fact, with an open `metadata` map for backend-specific detail. The
//! on-disk field names (`date`, `removed`) are part of the log format
//! and must stay stable across releases.

mod event;
mod package;
mod query;

pub use event::{Action, Event, Scope};
pub use package::{PackageInfo, Transaction};
pub use query::{QueryFilter, Statistics};

/// Manager name used for events synthesized from the downloads watcher.
pub const DOWNLOAD_MANAGER: &str = "download";
