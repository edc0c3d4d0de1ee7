use anyhow::Result;
use pkglog_types::Scope;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment override for the configuration root. Used by tests and
/// relocated deployments (applies to both scopes).
pub const CONFIG_DIR_ENV: &str = "PKGLOG_CONFIG_DIR";

const CONFIG_FILE: &str = "pkglog.toml";
const SYSTEM_CONFIG_DIR: &str = "/etc/pkglog";

/// Which store serializations to keep on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Toml,
    #[default]
    Both,
}

/// Persisted settings: a flat TOML document at a scope-determined
/// path. The journal itself only consumes the resolved scope and data
/// root; everything else here drives the daemon and hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scope: Scope,
    #[serde(default = "default_true")]
    pub enable_download_monitoring: bool,
    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: PathBuf,
    #[serde(default)]
    pub log_format: LogFormat,
    /// File extensions (with leading dot, matched case-insensitively)
    /// the downloads monitor records.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_downloads_dir() -> PathBuf {
    if let Some(dir) = dirs::download_dir() {
        return dir;
    }
    if let Some(home) = dirs::home_dir() {
        return home.join("Downloads");
    }
    PathBuf::from("Downloads")
}

fn default_extensions() -> Vec<String> {
    [".rpm", ".deb", ".pkg", ".exe", ".msi", ".dmg"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope: Scope::default(),
            enable_download_monitoring: true,
            downloads_dir: default_downloads_dir(),
            log_format: LogFormat::default(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load whichever scope's config file is authoritative: the system
    /// file when present, else the user file, else defaults.
    pub fn load() -> Result<Self> {
        Self::load_preferring(&Self::path_for(Scope::System), &Self::path_for(Scope::User))
    }

    pub fn load_preferring(system: &Path, user: &Path) -> Result<Self> {
        if system.exists() {
            return Self::load_from(system);
        }
        Self::load_from(user)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Persist for the given scope, and remove the opposite scope's
    /// file so there is never ambiguity about which is authoritative.
    pub fn save_for(&self, scope: Scope) -> Result<PathBuf> {
        let path = Self::path_for(scope);
        let stale = Self::path_for(match scope {
            Scope::User => Scope::System,
            Scope::System => Scope::User,
        });
        self.save_replacing(&path, &stale)?;
        Ok(path)
    }

    /// Persist to `path` and remove the opposite scope's `stale` file,
    /// so exactly one document is authoritative afterwards.
    pub fn save_replacing(&self, path: &Path, stale: &Path) -> Result<()> {
        self.save_to(path)?;

        if stale.exists() {
            if let Err(err) = std::fs::remove_file(stale) {
                warn!(path = %stale.display(), error = %err, "could not remove stale config");
            }
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_for(scope: Scope) -> PathBuf {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            let root = PathBuf::from(dir);
            return match scope {
                Scope::User => root.join(CONFIG_FILE),
                Scope::System => root.join("system").join(CONFIG_FILE),
            };
        }
        let root = match scope {
            Scope::User => user_config_dir(),
            Scope::System => PathBuf::from(SYSTEM_CONFIG_DIR),
        };
        root.join(CONFIG_FILE)
    }

    /// Whether a file name's extension is in the monitored allow-set.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext.to_lowercase());
        self.extensions.iter().any(|e| e.to_lowercase() == dotted)
    }
}

fn user_config_dir() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join("pkglog");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".config/pkglog");
    }
    PathBuf::from(".pkglog")
}
