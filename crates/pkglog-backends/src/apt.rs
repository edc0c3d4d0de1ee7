use crate::backend::PackageBackend;
use crate::helpers::{command_on_path, run_capture};
use pkglog_store::Journal;
use pkglog_types::{PackageInfo, Transaction};
use tracing::warn;

const QUERY_FORMAT: &str = "${Package}\t${Version}\t${Architecture}\n";

/// Backend for apt/dpkg systems (Debian, Ubuntu).
///
/// Like pacman, logging is hook-driven: an APT post-invoke hook calls
/// the CLI. Enumeration goes through dpkg-query.
pub struct AptBackend;

/// Parse one `dpkg-query -W` line in [`QUERY_FORMAT`].
pub fn parse_dpkg_line(line: &str) -> Option<PackageInfo> {
    let mut fields = line.split('\t');
    let name = fields.next()?.trim();
    let version = fields.next()?.trim();
    if name.is_empty() || version.is_empty() {
        warn!(line, "skipping malformed dpkg query line");
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

impl PackageBackend for AptBackend {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn is_available(&self) -> bool {
        command_on_path("apt") && command_on_path("dpkg-query")
    }

    fn list_installed(&self) -> Vec<PackageInfo> {
        let Some(stdout) = run_capture("dpkg-query", &["-W", "-f", QUERY_FORMAT]) else {
            return Vec::new();
        };
        stdout.lines().filter_map(parse_dpkg_line).collect()
    }

    fn register_transaction(&self, _tx: &Transaction, _journal: &Journal) -> bool {
        // Hook-driven; the APT post-invoke hook invokes the CLI.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dpkg_line() {
        let pkg = parse_dpkg_line("ripgrep\t14.1.0-1\tamd64").unwrap();
        assert_eq!(pkg.name, "ripgrep");
        assert_eq!(pkg.version, "14.1.0-1");
        assert_eq!(pkg.architecture.as_deref(), Some("amd64"));
    }

    #[test]
    fn test_parse_dpkg_line_without_arch() {
        let pkg = parse_dpkg_line("tzdata\t2024a-1\t").unwrap();
        assert!(pkg.architecture.is_none());
    }

    #[test]
    fn test_parse_dpkg_line_rejects_malformed() {
        assert!(parse_dpkg_line("").is_none());
        assert!(parse_dpkg_line("name-only").is_none());
    }
}
