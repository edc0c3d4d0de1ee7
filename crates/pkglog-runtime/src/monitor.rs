use crate::config::Config;
use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use pkglog_store::Journal;
use pkglog_types::{Action, Event as LogEvent, DOWNLOAD_MANAGER};
use std::path::Path;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Watches one downloads directory (non-recursively) and records an
/// install-like event for every created file whose extension is in the
/// configured allow-set.
pub struct DownloadsMonitor {
    watcher: Option<PollWatcher>,
    drain: Option<JoinHandle<()>>,
}

/// Build the journal event for a downloaded file. Returns None for
/// paths without a usable file name. Stat failures are tolerated: the
/// size is recorded as 0 with a warning, never a crash.
pub fn download_event(path: &Path) -> Option<LogEvent> {
    let name = path
        .file_stem()
        .or_else(|| path.file_name())?
        .to_string_lossy()
        .into_owned();

    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not stat download");
            0
        }
    };
    let file_type = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    Some(
        LogEvent::new(name, DOWNLOAD_MANAGER, Action::Install)
            .with_metadata("file_path", path.display().to_string())
            .with_metadata("file_size", size)
            .with_metadata("file_type", file_type),
    )
}

impl DownloadsMonitor {
    /// Start watching `config.downloads_dir`, recording into `journal`.
    pub fn start(journal: Arc<Journal>, config: &Config) -> Result<Self> {
        Self::start_with_interval(journal, config, POLL_INTERVAL)
    }

    pub fn start_with_interval(
        journal: Arc<Journal>,
        config: &Config,
        poll_interval: Duration,
    ) -> Result<Self> {
        let dir = config.downloads_dir.clone();
        anyhow::ensure!(
            dir.is_dir(),
            "downloads directory not found: {}",
            dir.display()
        );

        let (tx, rx) = channel::<Event>();
        let mut watcher = PollWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default().with_poll_interval(poll_interval),
        )
        .context("failed to create downloads watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", dir.display()))?;
        info!(dir = %dir.display(), "monitoring downloads directory");

        let filter = config.clone();
        let drain = std::thread::spawn(move || {
            for event in rx {
                if !matches!(event.kind, EventKind::Create(_)) {
                    continue;
                }
                for path in event.paths {
                    if path.is_dir() || !filter.matches_extension(&path) {
                        continue;
                    }
                    if let Some(log_event) = download_event(&path) {
                        journal.record(log_event);
                    }
                }
            }
        });

        Ok(Self {
            watcher: Some(watcher),
            drain: Some(drain),
        })
    }

    /// Stop watching and drain pending events. Dropping the watcher
    /// closes the channel, which ends the drain thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.watcher.take();
        if let Some(handle) = self.drain.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DownloadsMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkglog_store::ScopePolicy;
    use pkglog_types::{QueryFilter, Scope};
    use tempfile::TempDir;

    #[test]
    fn test_download_event_metadata() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("tool-1.2.rpm");
        std::fs::write(&file, b"not really an rpm").unwrap();

        let event = download_event(&file).unwrap();
        assert_eq!(event.name, "tool-1.2");
        assert_eq!(event.manager, DOWNLOAD_MANAGER);
        assert_eq!(event.action, Action::Install);
        assert_eq!(event.metadata["file_type"], ".rpm");
        assert_eq!(event.metadata["file_size"], 17);
        assert_eq!(
            event.metadata["file_path"],
            file.display().to_string().as_str()
        );
    }

    #[test]
    fn test_download_event_stat_failure_records_zero_size() {
        let event = download_event(Path::new("/nonexistent/ghost.deb")).unwrap();
        assert_eq!(event.name, "ghost");
        assert_eq!(event.metadata["file_size"], 0);
    }

    #[test]
    fn test_monitor_records_matching_downloads() {
        let data_dir = TempDir::new().unwrap();
        let downloads = TempDir::new().unwrap();

        let journal = Arc::new(Journal::open(ScopePolicy::at(
            Scope::User,
            data_dir.path(),
        )));
        let mut config = Config::default();
        config.downloads_dir = downloads.path().to_path_buf();

        let monitor = DownloadsMonitor::start_with_interval(
            Arc::clone(&journal),
            &config,
            Duration::from_millis(50),
        )
        .unwrap();

        std::fs::write(downloads.path().join("app.deb"), b"payload").unwrap();
        std::fs::write(downloads.path().join("notes.txt"), b"ignored").unwrap();

        // Poll until the watcher picks up the creation
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        loop {
            let events = journal.query(&QueryFilter::default());
            if !events.is_empty() {
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].name, "app");
                assert_eq!(events[0].manager, DOWNLOAD_MANAGER);
                break;
            }
            assert!(
                std::time::Instant::now() < deadline,
                "watcher never reported the download"
            );
            std::thread::sleep(Duration::from_millis(50));
        }

        monitor.stop();
    }
}
