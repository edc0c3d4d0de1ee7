use anyhow::Result;
use pkglog_runtime::{Config, DownloadsMonitor};
use pkglog_store::{Journal, ScopePolicy};
use pkglog_types::Scope;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn handle(policy: ScopePolicy) -> Result<()> {
    let scope = policy.scope;
    let journal = Arc::new(Journal::open(policy));
    let config = Config::load()?;

    // Download monitoring watches a per-user directory, so it only
    // runs in user scope.
    let monitor = if scope == Scope::User && config.enable_download_monitoring {
        let monitor = DownloadsMonitor::start(Arc::clone(&journal), &config)?;
        println!(
            "Monitoring downloads folder: {}",
            config.downloads_dir.display()
        );
        Some(monitor)
    } else {
        if scope == Scope::System {
            println!("Download monitoring is only available in user scope.");
        }
        None
    };

    println!("Monitoring started (scope: {}). Press Ctrl+C to stop.", scope);

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    })?;

    while running.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_secs(1));
    }

    if let Some(monitor) = monitor {
        monitor.stop();
    }
    println!("Monitoring stopped.");
    Ok(())
}
