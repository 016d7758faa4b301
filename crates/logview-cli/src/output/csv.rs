use super::column_label;
use anyhow::Result;
use logview_types::{Scalar, Table, ViewConfig};
use std::io::Write;

/// Write the visible columns of a table as CSV: alias labels as the header
/// row, null cells as empty fields.
pub fn write_table<W: Write>(writer: W, table: &Table, view: &ViewConfig) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let header: Vec<&str> = table
        .visible_columns
        .iter()
        .map(|column| column_label(view, column))
        .collect();
    csv_writer.write_record(&header)?;

    for row in &table.rows {
        let cells: Vec<String> = table
            .visible_columns
            .iter()
            .map(|column| match row.get(column) {
                Some(value) if !value.is_null() => value.to_string(),
                _ => String::new(),
            })
            .collect();
        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush()?;
    Ok(())
}
