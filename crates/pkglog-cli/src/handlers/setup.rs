use anyhow::Result;
use pkglog_runtime::Config;
use pkglog_store::{Journal, ScopePolicy};

pub fn handle(policy: ScopePolicy) -> Result<()> {
    let scope = policy.scope;
    let journal = Journal::open(policy);

    let mut config = Config::load()?;
    config.scope = scope;
    let config_path = config.save_for(scope)?;

    println!("Setup complete for {} scope.", scope);
    println!("Log directory created at: {}", journal.data_dir().display());
    println!("Configuration saved to: {}", config_path.display());
    Ok(())
}
