use crate::args::ExportFormat;
use anyhow::{Context, Result};
use pkglog_store::Journal;

/// Print a store file verbatim: consumers get the raw serialized
/// sequence, not a re-rendering.
pub fn handle(journal: &Journal, format: ExportFormat) -> Result<()> {
    let path = match format {
        ExportFormat::Json => journal.json_path(),
        ExportFormat::Toml => journal.toml_path(),
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    print!("{}", content);
    Ok(())
}
