use std::collections::HashSet;

/// Resolve the final column order: configured entries that actually exist,
/// each at most once, followed by the remaining columns in discovery order.
/// Configured names absent from the column set are silently dropped.
pub fn ordered_columns(configured: &[String], all_columns: &[String]) -> Vec<String> {
    let existing: HashSet<&str> = all_columns.iter().map(String::as_str).collect();
    let mut ordered: Vec<String> = Vec::with_capacity(all_columns.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for column in configured {
        if existing.contains(column.as_str()) && seen.insert(column.as_str()) {
            ordered.push(column.clone());
        }
    }

    for column in all_columns {
        if seen.insert(column.as_str()) {
            ordered.push(column.clone());
        }
    }

    ordered
}
