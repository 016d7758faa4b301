pub mod expr;
mod format;
mod normalize;
mod order;
mod sort;

use logview_types::{Record, Row, Scalar, Table, ViewConfig};
use std::collections::HashSet;

/// Apply a view configuration to a set of scanned records.
///
/// Pure and stateless: normalizes the records into a rectangular row set,
/// evaluates computed columns, resolves column order and visibility, sorts
/// (pinned rows first), and applies display formats last so formatting never
/// influences sort order. Per-row and per-cell failures are absorbed into
/// the output as `ERROR:` / `FORMAT_ERROR:` cells; only configuration
/// problems are surfaced before this point, by `ViewConfig::validate`.
pub fn apply_view(records: &[Record], view: &ViewConfig) -> Table {
    let (mut rows, mut all_columns) = normalize::normalize_rows(records);
    apply_computed_columns(&mut rows, &mut all_columns, view);

    let ordered_columns = order::ordered_columns(&view.columns.order, &all_columns);
    let hidden: HashSet<&str> = view.columns.hidden.iter().map(String::as_str).collect();
    let visible_columns = ordered_columns
        .iter()
        .filter(|column| !hidden.contains(column.as_str()))
        .cloned()
        .collect();

    let mut rows = sort::sort_rows(rows, view);
    format::apply_display_formats(&mut rows, view);

    Table {
        all_columns: ordered_columns,
        visible_columns,
        rows,
    }
}

/// Evaluate each configured computed column against every row, in list
/// order. A later computed column sees the values written by earlier ones,
/// so ordering is significant. Failures become `ERROR:` cells for that row
/// only.
fn apply_computed_columns(rows: &mut [Row], all_columns: &mut Vec<String>, view: &ViewConfig) {
    for computed in &view.columns.computed {
        if !all_columns.contains(&computed.name) {
            all_columns.push(computed.name.clone());
        }

        // Parse once per column; a parse failure poisons every row the same
        // way a per-row evaluation failure would.
        let parsed = expr::parse(&computed.expr);

        for row in rows.iter_mut() {
            let value = match &parsed {
                Ok(expression) => match expr::evaluate(expression, row) {
                    Ok(value) => value,
                    Err(message) => Scalar::Str(format!("ERROR: {}", message)),
                },
                Err(message) => Scalar::Str(format!("ERROR: {}", message)),
            };
            row.insert(computed.name.clone(), value);
        }
    }
}
