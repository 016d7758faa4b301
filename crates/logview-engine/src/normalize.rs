use logview_types::{Record, Row, Scalar};
use std::collections::HashSet;

/// Turn heterogeneous records into a rectangular row set.
///
/// Rows keep the input order and count. Column discovery is first-seen
/// order, always seeded with `path` regardless of whether any record
/// defines it; rows missing `path` get a null one. After discovery, every
/// row is backfilled with null for the columns it lacks.
pub fn normalize_rows(records: &[Record]) -> (Vec<Row>, Vec<String>) {
    let mut discovered_columns = vec!["path".to_string()];
    let mut seen: HashSet<String> = discovered_columns.iter().cloned().collect();
    let mut rows: Vec<Row> = Vec::with_capacity(records.len());

    for record in records {
        let mut row = record.clone();
        if !row.contains_key("path") {
            row.insert("path".to_string(), Scalar::Null);
        }

        for key in row.keys() {
            if seen.insert(key.clone()) {
                discovered_columns.push(key.clone());
            }
        }

        rows.push(row);
    }

    for row in &mut rows {
        for column in &discovered_columns {
            if !row.contains_key(column) {
                row.insert(column.clone(), Scalar::Null);
            }
        }
    }

    (rows, discovered_columns)
}
