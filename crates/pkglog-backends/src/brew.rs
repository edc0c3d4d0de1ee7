use crate::backend::PackageBackend;
use crate::helpers::{command_on_path, run_capture};
use pkglog_store::Journal;
use pkglog_types::{PackageInfo, Transaction};

/// Backend for Homebrew (macOS, Linuxbrew).
///
/// `brew list --versions` prints `name v1 [v2 ...]`; the newest listed
/// version wins. Hook-driven like the other CLI managers.
pub struct BrewBackend;

/// Parse one `brew list --versions` line.
pub fn parse_versions_line(line: &str) -> Option<(String, String)> {
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let version = fields.last()?;
    Some((name.to_string(), version.to_string()))
}

impl PackageBackend for BrewBackend {
    fn name(&self) -> &'static str {
        "brew"
    }

    fn is_available(&self) -> bool {
        command_on_path("brew")
    }

    fn list_installed(&self) -> Vec<PackageInfo> {
        let Some(stdout) = run_capture("brew", &["list", "--versions"]) else {
            return Vec::new();
        };
        stdout
            .lines()
            .filter_map(parse_versions_line)
            .map(|(name, version)| {
                let mut pkg = PackageInfo::new(name, version);
                pkg.installed = true;
                pkg
            })
            .collect()
    }

    fn register_transaction(&self, _tx: &Transaction, _journal: &Journal) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versions_line_takes_newest() {
        let (name, version) = parse_versions_line("node 20.11.0 21.6.1").unwrap();
        assert_eq!(name, "node");
        assert_eq!(version, "21.6.1");
    }

    #[test]
    fn test_parse_versions_line_single_version() {
        let (name, version) = parse_versions_line("jq 1.7.1").unwrap();
        assert_eq!(name, "jq");
        assert_eq!(version, "1.7.1");
    }

    #[test]
    fn test_parse_versions_line_rejects_name_only() {
        assert!(parse_versions_line("mystery").is_none());
        assert!(parse_versions_line("").is_none());
    }
}
