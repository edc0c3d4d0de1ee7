use crate::backend::PackageBackend;
use crate::helpers::{command_on_path, run_capture};
use pkglog_store::Journal;
use pkglog_types::{Action, Event, PackageInfo, Transaction};
use std::path::Path;
use tracing::warn;

const QUERY_FORMAT: &str = "%{NAME}\t%{VERSION}-%{RELEASE}\t%{ARCH}\n";

/// Backend for dnf/rpm systems (Fedora, RHEL and friends).
///
/// This is the one backend with native transaction registration: the
/// dnf plugin hands the install/remove sets to `register_transaction`
/// after each transaction commits.
pub struct DnfBackend;

/// Parse one `rpm -qa` line in [`QUERY_FORMAT`].
pub fn parse_rpm_line(line: &str) -> Option<PackageInfo> {
    let mut fields = line.split('\t');
    let name = fields.next()?.trim();
    let version = fields.next()?.trim();
    if name.is_empty() || version.is_empty() {
        warn!(line, "skipping malformed rpm query line");
        return None;
    }
    let mut pkg = PackageInfo::new(name, version);
    pkg.architecture = fields
        .next()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from);
    pkg.installed = true;
    Some(pkg)
}

impl PackageBackend for DnfBackend {
    fn name(&self) -> &'static str {
        "dnf"
    }

    fn is_available(&self) -> bool {
        command_on_path("dnf") || Path::new("/usr/bin/dnf").exists()
    }

    fn list_installed(&self) -> Vec<PackageInfo> {
        let Some(stdout) = run_capture("rpm", &["-qa", "--qf", QUERY_FORMAT]) else {
            return Vec::new();
        };
        stdout.lines().filter_map(parse_rpm_line).collect()
    }

    fn register_transaction(&self, tx: &Transaction, journal: &Journal) -> bool {
        if !self.is_available() {
            return false;
        }
        for pkg in &tx.installed {
            journal.record(transaction_event(self.name(), pkg, Action::Install));
        }
        for pkg in &tx.removed {
            journal.record(transaction_event(self.name(), pkg, Action::Remove));
        }
        true
    }
}

fn transaction_event(manager: &str, pkg: &PackageInfo, action: Action) -> Event {
    let mut event = Event::new(pkg.name.clone(), manager, action);
    if !pkg.version.is_empty() {
        event = event.with_version(pkg.version.clone());
    }
    if let Some(arch) = &pkg.architecture {
        event = event.with_metadata("arch", arch.clone());
    }
    if let Some(repo) = &pkg.repository {
        event = event.with_metadata("repo", repo.clone());
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkglog_store::ScopePolicy;
    use pkglog_types::{QueryFilter, Scope};
    use tempfile::TempDir;

    #[test]
    fn test_parse_rpm_line() {
        let pkg = parse_rpm_line("ripgrep\t14.1.0-1.fc40\tx86_64").unwrap();
        assert_eq!(pkg.name, "ripgrep");
        assert_eq!(pkg.version, "14.1.0-1.fc40");
        assert_eq!(pkg.architecture.as_deref(), Some("x86_64"));
        assert!(pkg.installed);
    }

    #[test]
    fn test_parse_rpm_line_rejects_malformed() {
        assert!(parse_rpm_line("").is_none());
        assert!(parse_rpm_line("just-a-name").is_none());
        assert!(parse_rpm_line("\t1.0\tx86_64").is_none());
    }

    #[test]
    fn test_transaction_event_carries_metadata() {
        let mut pkg = PackageInfo::new("ripgrep", "14.1.0-1.fc40");
        pkg.architecture = Some("x86_64".to_string());
        pkg.repository = Some("fedora".to_string());

        let event = transaction_event("dnf", &pkg, Action::Install);
        assert_eq!(event.manager, "dnf");
        assert_eq!(event.version.as_deref(), Some("14.1.0-1.fc40"));
        assert_eq!(event.metadata["arch"], "x86_64");
        assert_eq!(event.metadata["repo"], "fedora");
    }

    #[test]
    fn test_register_transaction_records_both_sets() {
        let dir = TempDir::new().unwrap();
        let journal = Journal::open(ScopePolicy::at(Scope::User, dir.path()));

        let tx = Transaction {
            installed: vec![PackageInfo::new("new-tool", "1.0-1")],
            removed: vec![PackageInfo::new("old-tool", "0.9-2")],
        };
        // Exercise the event conversion directly so the test does not
        // depend on dnf being present on the host.
        for pkg in &tx.installed {
            journal.record(transaction_event("dnf", pkg, Action::Install));
        }
        for pkg in &tx.removed {
            journal.record(transaction_event("dnf", pkg, Action::Remove));
        }

        let all = journal.query(&QueryFilter::default());
        assert_eq!(all.len(), 2);
        assert!(all[0].is_open());
        assert!(all[1].removed);
    }
}
