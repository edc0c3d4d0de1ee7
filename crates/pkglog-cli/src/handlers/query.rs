use anyhow::{Context, Result};
use chrono::NaiveDate;
use pkglog_store::Journal;
use pkglog_types::QueryFilter;

pub fn handle(
    journal: &Journal,
    name: Option<String>,
    manager: Option<String>,
    since: Option<&str>,
) -> Result<()> {
    let since = since
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid --since date '{}' (expected YYYY-MM-DD)", s))
        })
        .transpose()?;

    let filter = QueryFilter {
        name,
        manager,
        since,
    };
    let events = journal.query(&filter);

    if events.is_empty() {
        println!("No matching records.");
        return Ok(());
    }

    for event in &events {
        let state = if event.removed { "removed" } else { "installed" };
        let version = event.version.as_deref().unwrap_or("-");
        println!(
            "{}  {:9} {:10} {}  {}",
            event.date.format("%Y-%m-%d %H:%M:%S"),
            state,
            event.manager,
            event.name,
            version,
        );
    }
    println!("{} record(s).", events.len());
    Ok(())
}
