use crate::value::Row;
use serde::Serialize;

/// The materialized result of applying a view to a record set.
///
/// Transient and recomputed on demand; never persisted. Every row carries a
/// value for every column in `all_columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Full ordered column list, `path` first.
    pub all_columns: Vec<String>,
    /// Ordered subset of `all_columns` with hidden columns removed.
    pub visible_columns: Vec<String>,
    /// Rows in final display order: pinned first, then sorted/scan order.
    pub rows: Vec<Row>,
}
