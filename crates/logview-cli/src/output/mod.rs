pub mod csv;
pub mod payload;
pub mod table;

use is_terminal::IsTerminal;
use logview_scanner::{ScanSummary, ScanWarning};
use logview_types::ViewConfig;
use owo_colors::OwoColorize;

/// Display label for a column: its non-blank alias when one is configured,
/// otherwise the column name itself.
pub fn column_label<'a>(view: &'a ViewConfig, column: &'a str) -> &'a str {
    match view.columns.alias.get(column) {
        Some(alias) if !alias.trim().is_empty() => alias,
        _ => column,
    }
}

pub fn print_summary(summary: &ScanSummary) {
    println!(
        "Scan summary: total_files={} matched_files={} parsed_records={} warnings={}",
        summary.total_files, summary.matched_files, summary.parsed_records, summary.warning_count
    );
}

pub fn print_warnings(warnings: &[ScanWarning], limit: usize) {
    if warnings.is_empty() {
        return;
    }

    let use_color = std::io::stdout().is_terminal();
    println!("Warnings:");
    for warning in warnings.iter().take(limit) {
        let line = format!("- {}: {}", warning.path, warning.message);
        if use_color {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
    if warnings.len() > limit {
        println!("... and {} more", warnings.len() - limit);
    }
}
