use crate::error::Result;
use crate::lock::StoreLock;
use crate::mirror;
use crate::scope::ScopePolicy;
use pkglog_types::{Action, Event, QueryFilter, Statistics};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, error, warn};

/// Structured store file name (JSON array of events, source of truth).
pub const JSON_FILE: &str = "packages.json";
/// Mirror store file name (regenerated TOML rendering).
pub const TOML_FILE: &str = "packages.toml";
/// Sibling lock file used for the cross-process advisory lock. A
/// separate stable path is locked (not the store itself) because the
/// store file is replaced by rename on every write.
const LOCK_FILE: &str = "packages.lock";

/// The event log engine. Sole writer and reader of the persisted
/// package/download history for one scope.
///
/// Public operations never return errors and never panic: every
/// storage fault is absorbed at this boundary into a logged diagnostic
/// plus a benign value (no-op write, empty query result, zero stats),
/// so a storage problem can never crash a calling adapter or hook.
pub struct Journal {
    policy: ScopePolicy,
    json_path: PathBuf,
    toml_path: PathBuf,
    lock_path: PathBuf,
    /// Serializes writers inside this process; the file lock in
    /// `record` serializes across processes.
    write_lock: Mutex<()>,
}

impl Journal {
    /// Open (and if needed initialize) the stores for a resolved scope.
    ///
    /// Initialization is best-effort: a failure to create the directory
    /// or seed the store files is logged, and the journal constructs
    /// anyway — later operations degrade per the failure contract.
    pub fn open(policy: ScopePolicy) -> Self {
        let journal = Self {
            json_path: policy.data_dir.join(JSON_FILE),
            toml_path: policy.data_dir.join(TOML_FILE),
            lock_path: policy.data_dir.join(LOCK_FILE),
            policy,
            write_lock: Mutex::new(()),
        };
        if let Err(err) = journal.ensure_storage() {
            error!(
                dir = %journal.policy.data_dir.display(),
                error = %err,
                "failed to initialize journal storage"
            );
        }
        journal
    }

    pub fn scope(&self) -> pkglog_types::Scope {
        self.policy.scope
    }

    pub fn data_dir(&self) -> &Path {
        &self.policy.data_dir
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    pub fn toml_path(&self) -> &Path {
        &self.toml_path
    }

    /// Record one event. Events with an empty (post-trim) name are
    /// dropped with a warning; storage faults are logged and the event
    /// is lost, never surfaced to the caller.
    pub fn record(&self, event: Event) {
        if event.name.trim().is_empty() {
            warn!(manager = %event.manager, "dropping event with empty package name");
            return;
        }
        if let Err(err) = self.record_inner(event) {
            error!(error = %err, "failed to record event");
        }
    }

    /// Load all records and apply the filter, in storage order (oldest
    /// first; upserted records keep their original position). Returns
    /// an empty result on any read or parse failure.
    pub fn query(&self, filter: &QueryFilter) -> Vec<Event> {
        match self.load_entries() {
            Ok(entries) => entries.into_iter().filter(|e| filter.matches(e)).collect(),
            Err(err) => {
                error!(error = %err, "failed to read structured store for query");
                Vec::new()
            }
        }
    }

    /// Aggregate counts over the whole log. Returns zero counts (with
    /// the effective scope still populated) on any read failure.
    pub fn statistics(&self) -> Statistics {
        match self.load_entries() {
            Ok(entries) => Statistics::from_events(&entries, self.policy.scope),
            Err(err) => {
                error!(error = %err, "failed to read structured store for statistics");
                Statistics::empty(self.policy.scope)
            }
        }
    }

    fn record_inner(&self, mut event: Event) -> Result<()> {
        event.name = event.name.trim().to_string();
        // Scope is captured from the resolver state at write time,
        // whatever the producer stamped on the event.
        event.scope = self.policy.scope;

        // Both layers held for the whole read-modify-write cycle:
        // threads serialize on the mutex, processes on the file lock.
        let _threads = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let _processes = StoreLock::acquire(&self.lock_path)?;

        let mut entries = self.load_entries()?;
        self.upsert(&mut entries, event);

        let json = serde_json::to_string_pretty(&entries)?;
        self.write_atomic(&self.json_path, &json)?;

        // Mirror regeneration is best-effort: the structured store
        // write already succeeded and is authoritative.
        if let Err(err) = self.write_atomic(&self.toml_path, &mirror::render(&entries)) {
            warn!(error = %err, "failed to regenerate mirror store");
        }
        Ok(())
    }

    /// Apply the upsert policy to the loaded sequence.
    ///
    /// A remove closes the most recent open record for the same
    /// `(name, manager)` in place instead of appending a duplicate; a
    /// remove with no matching open record, and every install, appends.
    fn upsert(&self, entries: &mut Vec<Event>, event: Event) {
        if event.action == Action::Remove {
            let open = entries
                .iter_mut()
                .rev()
                .find(|e| e.is_open() && e.name == event.name && e.manager == event.manager);
            if let Some(existing) = open {
                debug!(name = %event.name, manager = %event.manager, "closing open record");
                existing.removed = true;
                existing.action = Action::Remove;
                existing.removed_at = Some(event.date);
                return;
            }
        }
        entries.push(event);
    }

    /// Read the current structured-store contents. A missing or empty
    /// file is an empty sequence; malformed content is an error (the
    /// caller decides whether to fail the write or degrade the read).
    fn load_entries(&self) -> Result<Vec<Event>> {
        let raw = match fs::read_to_string(&self.json_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace `path` atomically: write a temp file in the same
    /// directory, then rename over the target. Readers only ever see
    /// fully-formed content, so unlocked reads stay safe.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        let tmp = path.with_file_name(name);

        fs::write(&tmp, contents)?;
        apply_mode(&tmp, self.policy.file_mode)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn ensure_storage(&self) -> Result<()> {
        fs::create_dir_all(&self.policy.data_dir)?;
        apply_mode(&self.policy.data_dir, self.policy.dir_mode)?;

        if !self.json_path.exists() {
            fs::write(&self.json_path, "[]")?;
        }
        if !self.toml_path.exists() {
            fs::write(&self.toml_path, "")?;
        }
        apply_mode(&self.json_path, self.policy.file_mode)?;
        apply_mode(&self.toml_path, self.policy.file_mode)?;
        Ok(())
    }
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
