use indexmap::IndexMap;
use logview_scanner::{ScanResult, ScanSummary, ScanWarning};
use logview_types::{Row, Table, ViewConfig};
use serde::Serialize;

/// JSON shape for a full scan-and-render, suitable for an HTTP layer or
/// machine consumption of `scan --format json`.
#[derive(Serialize)]
pub struct ScanPayload<'a> {
    pub summary: &'a ScanSummary,
    pub warnings: &'a [ScanWarning],
    pub columns: ColumnsPayload<'a>,
    pub rows: &'a [Row],
}

#[derive(Serialize)]
pub struct ColumnsPayload<'a> {
    pub all: &'a [String],
    pub visible: &'a [String],
    pub hidden: &'a [String],
    pub alias: &'a IndexMap<String, String>,
}

impl<'a> ScanPayload<'a> {
    pub fn new(scan: &'a ScanResult, table: &'a Table, view: &'a ViewConfig) -> Self {
        Self {
            summary: &scan.summary,
            warnings: &scan.warnings,
            columns: ColumnsPayload {
                all: &table.all_columns,
                visible: &table.visible_columns,
                hidden: &view.columns.hidden,
                alias: &view.columns.alias,
            },
            rows: &table.rows,
        }
    }
}
