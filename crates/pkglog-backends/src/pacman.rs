use crate::backend::PackageBackend;
use crate::helpers::{command_on_path, run_capture};
use pkglog_store::Journal;
use pkglog_types::{PackageInfo, Transaction};
use tracing::warn;

/// Backend for pacman (Arch and derivatives).
///
/// Automatic logging relies on an ALPM hook calling `pkglog log` after
/// each transaction; see the packaging docs for the hook file. This
/// process cannot intercept pacman transactions itself, so
/// `register_transaction` reports unsupported.
pub struct PacmanBackend;

/// Parse one `pacman -Q` line (`name version`).
pub fn parse_query_line(line: &str) -> Option<(String, String)> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(name), Some(version)) => Some((name.to_string(), version.to_string())),
        _ => {
            if !line.trim().is_empty() {
                warn!(line, "skipping malformed pacman query line");
            }
            None
        }
    }
}

impl PackageBackend for PacmanBackend {
    fn name(&self) -> &'static str {
        "pacman"
    }

    fn is_available(&self) -> bool {
        command_on_path("pacman")
    }

    fn list_installed(&self) -> Vec<PackageInfo> {
        let Some(stdout) = run_capture("pacman", &["-Q"]) else {
            return Vec::new();
        };
        stdout
            .lines()
            .filter_map(parse_query_line)
            .map(|(name, version)| {
                let mut pkg = PackageInfo::new(name, version);
                pkg.installed = true;
                pkg
            })
            .collect()
    }

    fn register_transaction(&self, _tx: &Transaction, _journal: &Journal) -> bool {
        // Hook-driven; the ALPM hook invokes the CLI directly.
        false
    }
}
