//! Runtime glue around the journal: configuration persistence and the
//! downloads-directory monitor.

pub mod config;
pub mod monitor;

pub use config::{Config, LogFormat};
pub use monitor::DownloadsMonitor;
