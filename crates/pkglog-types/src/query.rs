use crate::event::{Event, Scope};
use crate::DOWNLOAD_MANAGER;
use chrono::NaiveDate;
use serde::Serialize;

/// Filters applied by [`matches`]. All fields are optional and AND-ed.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    /// Case-insensitive substring match on the record name.
    pub name: Option<String>,
    /// Exact match on the manager name.
    pub manager: Option<String>,
    /// Keep records whose date is on or after this day.
    pub since: Option<NaiveDate>,
}

impl QueryFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.manager.is_none() && self.since.is_none()
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(needle) = &self.name {
            if !event.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(manager) = &self.manager {
            if event.manager != *manager {
                return false;
            }
        }
        if let Some(since) = self.since {
            if event.date.date_naive() < since {
                return false;
            }
        }
        true
    }
}

/// Aggregate counts over the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub installed: usize,
    pub removed: usize,
    pub downloads: usize,
    pub scope: Scope,
}

impl Statistics {
    pub fn empty(scope: Scope) -> Self {
        Self {
            total: 0,
            installed: 0,
            removed: 0,
            downloads: 0,
            scope,
        }
    }

    pub fn from_events(events: &[Event], scope: Scope) -> Self {
        Self {
            total: events.len(),
            installed: events.iter().filter(|e| !e.removed).count(),
            removed: events.iter().filter(|e| e.removed).count(),
            downloads: events
                .iter()
                .filter(|e| e.manager == DOWNLOAD_MANAGER)
                .count(),
            scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Action, Event};
    use chrono::{TimeZone, Utc};

    fn fixture() -> Vec<Event> {
        let mut foo = Event::new("foo-lib", "dnf", Action::Install);
        foo.date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let mut bar = Event::new("bar-lib", "dnf", Action::Remove);
        bar.date = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();

        let mut baz = Event::new("baz.rpm", "download", Action::Install);
        baz.date = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();

        vec![foo, bar, baz]
    }

    #[test]
    fn test_name_filter_is_substring_case_insensitive() {
        let events = fixture();
        let filter = QueryFilter {
            name: Some("FOO".to_string()),
            ..Default::default()
        };
        let hits: Vec<_> = events.iter().filter(|e| filter.matches(e)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "foo-lib");
    }

    #[test]
    fn test_manager_filter_is_exact() {
        let events = fixture();
        let filter = QueryFilter {
            manager: Some("download".to_string()),
            ..Default::default()
        };
        let hits: Vec<_> = events.iter().filter(|e| filter.matches(e)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "baz.rpm");

        // "down" must not match: manager is exact, not substring
        let filter = QueryFilter {
            manager: Some("down".to_string()),
            ..Default::default()
        };
        assert!(!events.iter().any(|e| filter.matches(e)));
    }

    #[test]
    fn test_since_filter_keeps_on_or_after() {
        let events = fixture();
        let filter = QueryFilter {
            since: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..Default::default()
        };
        let hits: Vec<_> = events.iter().filter(|e| filter.matches(e)).collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "bar-lib");
        assert_eq!(hits[1].name, "baz.rpm");
    }

    #[test]
    fn test_statistics_counts() {
        let stats = Statistics::from_events(&fixture(), Scope::User);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.installed, 2);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.downloads, 1);
        assert_eq!(stats.scope, Scope::User);
    }
}
