use anyhow::Result;
use owo_colors::OwoColorize;
use pkglog_store::Journal;

pub fn handle(journal: &Journal) -> Result<()> {
    let stats = journal.statistics();

    println!("{}", "pkglog status".bold());
    println!("Scope: {}", stats.scope);
    println!("Total packages logged: {}", stats.total);
    println!("Installed: {}", stats.installed.green());
    println!("Removed: {}", stats.removed.red());
    println!("Downloads: {}", stats.downloads);
    println!("Log location: {}", journal.data_dir().display());
    Ok(())
}
