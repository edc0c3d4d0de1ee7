use pkglog_types::Event;
use serde::Serialize;
use tracing::warn;

/// Marker line written before any mirror record whose removed flag is
/// set, so removals stand out when eyeballing the file.
pub const REMOVED_MARKER: &str = "# --REMOVED--";

#[derive(Serialize)]
struct MirrorEntry<'a> {
    package: &'a Event,
}

/// Render the full mirror document from the in-memory sequence.
///
/// The mirror is always regenerated whole, never appended to, so an
/// upserted record shows up exactly once. A record that fails TOML
/// serialization is skipped with a warning; the structured store
/// remains authoritative.
pub fn render(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        match toml::to_string(&MirrorEntry { package: event }) {
            Ok(entry) => {
                if event.removed {
                    out.push_str(REMOVED_MARKER);
                    out.push('\n');
                }
                out.push_str(&entry);
                out.push('\n');
            }
            Err(err) => {
                warn!(
                    name = %event.name,
                    error = %err,
                    "skipping record in mirror store"
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkglog_types::Action;

    #[test]
    fn test_empty_sequence_renders_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_records_render_as_package_tables() {
        let events = vec![
            Event::new("foo-lib", "dnf", Action::Install).with_version("1.2-3"),
            Event::new("bar-lib", "dnf", Action::Remove),
        ];
        let out = render(&events);

        assert_eq!(out.matches("[package]").count(), 2);
        assert!(out.contains("name = \"foo-lib\""));
        assert!(out.contains("version = \"1.2-3\""));
    }

    #[test]
    fn test_marker_precedes_removed_records_only() {
        let events = vec![
            Event::new("keep", "dnf", Action::Install),
            Event::new("gone", "dnf", Action::Remove),
        ];
        let out = render(&events);

        assert_eq!(out.matches(REMOVED_MARKER).count(), 1);
        let marker_pos = out.find(REMOVED_MARKER).unwrap();
        let gone_pos = out.find("name = \"gone\"").unwrap();
        assert!(marker_pos < gone_pos);
    }

    #[test]
    fn test_regeneration_has_no_stale_duplicates() {
        let mut event = Event::new("pkg", "dnf", Action::Install);
        let before = render(std::slice::from_ref(&event));
        assert!(!before.contains(REMOVED_MARKER));

        event.removed = true;
        let after = render(std::slice::from_ref(&event));
        assert_eq!(after.matches("[package]").count(), 1);
        assert!(after.contains(REMOVED_MARKER));
    }
}
