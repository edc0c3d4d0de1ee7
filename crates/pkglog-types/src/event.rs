use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// What a recorded event did to its package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Install,
    Remove,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Remove => "remove",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install" => Ok(Action::Install),
            "remove" => Ok(Action::Remove),
            other => Err(format!("unknown action '{}' (expected install|remove)", other)),
        }
    }
}

/// Storage scope: per-user (restrictive permissions) or system-wide
/// (shared, root-managed, world-readable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    User,
    System,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::System => "system",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Scope::User),
            "system" => Ok(Scope::System),
            other => Err(format!("unknown scope '{}' (expected user|system)", other)),
        }
    }
}

/// One install/remove fact in the log.
///
/// `removed` mirrors `action` at creation time but is persisted as its
/// own flag so that a later remove can close an existing install record
/// in place (upsert) without rewriting its `action` history ambiguously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub manager: String,
    pub action: Action,
    /// Second-precision timestamp captured when the event was built.
    pub date: DateTime<Utc>,
    pub removed: bool,
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Set only when an open install record is closed by a later remove.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<DateTime<Utc>>,
    /// Open key/value detail (arch, repo, file path, ...). Kept as the
    /// last field: TOML serialization of the mirror needs every scalar
    /// emitted before this nested table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl Event {
    /// Build an event stamped with the current time. The journal stamps
    /// the effective scope at write time, so `scope` starts at the
    /// default here.
    pub fn new(name: impl Into<String>, manager: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            manager: manager.into(),
            action,
            date: Utc::now().trunc_subsecs(0),
            removed: action == Action::Remove,
            scope: Scope::default(),
            version: None,
            removed_at: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether this record is still "open" (installed, not yet removed).
    pub fn is_open(&self) -> bool {
        !self.removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_install_is_open() {
        let event = Event::new("ripgrep", "dnf", Action::Install);
        assert!(event.is_open());
        assert!(!event.removed);
        assert_eq!(event.date.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_new_remove_is_flagged() {
        let event = Event::new("ripgrep", "dnf", Action::Remove);
        assert!(event.removed);
        assert!(event.removed_at.is_none());
    }

    #[test]
    fn test_serde_round_trip_preserves_fields() {
        let event = Event::new("bat", "pacman", Action::Install)
            .with_version("0.24.0-1")
            .with_metadata("arch", "x86_64");

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_empty_metadata_not_serialized() {
        let event = Event::new("bat", "pacman", Action::Install);
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("metadata"));
        assert!(!json.contains("removed_at"));
    }

    #[test]
    fn test_scope_and_action_parse() {
        assert_eq!("system".parse::<Scope>().unwrap(), Scope::System);
        assert_eq!("install".parse::<Action>().unwrap(), Action::Install);
        assert!("global".parse::<Scope>().is_err());
        assert!("upgrade".parse::<Action>().is_err());
    }
}
