use anyhow::Result;
use pkglog_store::Journal;
use pkglog_types::{Action, Event};

pub fn handle(
    journal: &Journal,
    action: Action,
    name: &str,
    manager: &str,
    version: Option<String>,
) -> Result<()> {
    let mut event = Event::new(name, manager, action);
    if let Some(version) = version {
        event = event.with_version(version);
    }
    journal.record(event);
    println!("Logged {} of {} ({})", action, name, manager);
    Ok(())
}
