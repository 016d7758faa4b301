use crate::config::Config;
use crate::output;
use anyhow::{Context, Result};
use logview_scanner::scan_records;
use logview_store::{default_view, save_view};
use std::path::Path;

pub fn handle(root: &Path, pattern: &str, name: &str, warning_limit: usize) -> Result<()> {
    let config = Config::load(root)?;

    let view = default_view(name, pattern)?;
    let saved_path = save_view(root, &view)?;

    let ignored = config.ignored_set();
    let scan = scan_records(root, pattern, ignored.as_ref())
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    println!("Created view '{}' at {}", view.name, saved_path.display());
    output::print_summary(&scan.summary);
    output::print_warnings(&scan.warnings, warning_limit);
    Ok(())
}
