//! The event log engine: the sole writer/reader of persisted
//! package/download history.
//!
//! Two on-disk representations are kept per scope:
//! - `packages.json` — the structured store, a JSON array of events and
//!   the source of truth for queries and statistics.
//! - `packages.toml` — a human-inspectable mirror, fully regenerated
//!   from the structured store after every write.
//!
//! Writers serialize through an in-process mutex plus a cross-process
//! advisory file lock, and replace files only via temp-file + rename,
//! so readers never observe a half-written store.

mod error;
mod journal;
mod lock;
mod mirror;
mod scope;

pub use error::{Error, Result};
pub use journal::{Journal, JSON_FILE, TOML_FILE};
pub use lock::StoreLock;
pub use mirror::REMOVED_MARKER;
pub use scope::{is_privileged, ScopePolicy, DATA_DIR_ENV};
