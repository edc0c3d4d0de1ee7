use anyhow::Result;
use owo_colors::OwoColorize;
use pkglog_backends::BackendRegistry;

pub fn handle() -> Result<()> {
    let registry = BackendRegistry::with_default_backends();

    println!("{}", "Known backends:".bold());
    for backend in registry.iter() {
        let availability = if backend.is_available() {
            "available".green().to_string()
        } else {
            "not found".dimmed().to_string()
        };
        println!("  {:10} {}", backend.name(), availability);
    }
    Ok(())
}
