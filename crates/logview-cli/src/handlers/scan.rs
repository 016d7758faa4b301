use crate::config::Config;
use crate::output;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use logview_engine::apply_view;
use logview_scanner::scan_records;
use logview_store::load_view;
use std::path::Path;

pub fn handle(
    root: &Path,
    name: Option<&str>,
    format: OutputFormat,
    warning_limit: usize,
) -> Result<()> {
    let config = Config::load(root)?;
    let name = name
        .map(str::to_string)
        .or_else(|| config.default_view.clone())
        .unwrap_or_else(|| "default".to_string());

    let view = load_view(root, &name)?;

    let ignored = config.ignored_set();
    let scan = scan_records(root, &view.pattern, ignored.as_ref())
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let table = apply_view(&scan.records, &view);

    match format {
        OutputFormat::Plain => {
            output::table::print_table(&table, &view);
            output::print_summary(&scan.summary);
            output::print_warnings(&scan.warnings, warning_limit);
        }
        OutputFormat::Json => {
            let payload = output::payload::ScanPayload::new(&scan, &table, &view);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Csv => {
            output::csv::write_table(std::io::stdout(), &table, &view)?;
        }
    }

    Ok(())
}
