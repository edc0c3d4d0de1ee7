use clap::{Parser, Subcommand, ValueEnum};
use pkglog_types::{Action, Scope};

#[derive(Parser)]
#[command(name = "pkglog")]
#[command(about = "Log package installs, removals and downloads locally", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Logging scope: per-user or system-wide storage
    #[arg(long, default_value = "user", global = true)]
    pub scope: Scope,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the storage directories and persist the configuration
    Setup,

    /// Show current scope and log statistics
    Status,

    /// Record a single install or remove event (hook entry point)
    Log {
        /// install or remove
        action: Action,

        /// Package or file name
        name: String,

        /// Package manager name (or "download")
        manager: String,

        /// Package version, if known
        #[arg(long)]
        version: Option<String>,
    },

    /// Query the log with optional filters
    Query {
        /// Case-insensitive substring match on the name
        #[arg(long)]
        name: Option<String>,

        /// Exact manager name
        #[arg(long)]
        manager: Option<String>,

        /// Keep records on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },

    /// Print a store file verbatim
    Export {
        #[arg(long, default_value = "json")]
        format: ExportFormat,
    },

    /// List known package-manager backends and their availability
    Backends,

    /// Monitor the downloads directory until interrupted
    Daemon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Toml,
}
