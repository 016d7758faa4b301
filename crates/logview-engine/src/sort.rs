use logview_types::{Row, Scalar, SortDirection, ViewConfig};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Tri-level sort key: numeric values by magnitude, then other non-null
/// values by string form, then null. Numeric coercion covers numbers and
/// fully-numeric strings but never booleans (see `Scalar::as_numeric`).
#[derive(Debug)]
enum SortKey {
    Numeric(f64),
    Text(String),
    Null,
}

impl SortKey {
    fn of(value: Option<&Scalar>) -> SortKey {
        let Some(value) = value else {
            return SortKey::Null;
        };
        if let Some(n) = value.as_numeric() {
            return SortKey::Numeric(n);
        }
        match value {
            Scalar::Null => SortKey::Null,
            other => SortKey::Text(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Numeric(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Null => 2,
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Numeric(a), SortKey::Numeric(b)) => {
                // NaN never becomes a numeric key
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Order rows for display: pinned rows first (in `pinned_ids` order), then
/// the rest, stably sorted by the configured column or left in scan order.
pub fn sort_rows(rows: Vec<Row>, view: &ViewConfig) -> Vec<Row> {
    // First occurrence of a duplicated pinned id is authoritative
    let mut pinned_index: HashMap<&str, usize> = HashMap::new();
    for (index, id) in view.rows.pinned_ids.iter().enumerate() {
        pinned_index.entry(id.as_str()).or_insert(index);
    }

    let mut pinned: Vec<Row> = Vec::new();
    let mut other: Vec<Row> = Vec::new();

    for row in rows {
        let is_pinned = row
            .get("path")
            .and_then(Scalar::as_str)
            .is_some_and(|path| pinned_index.contains_key(path));
        if is_pinned {
            pinned.push(row);
        } else {
            other.push(row);
        }
    }

    pinned.sort_by_key(|row| {
        row.get("path")
            .and_then(Scalar::as_str)
            .and_then(|path| pinned_index.get(path).copied())
            .unwrap_or(usize::MAX)
    });

    if let Some(sort_field) = view.rows.sort.by.as_deref().filter(|f| !f.is_empty()) {
        let descending = view.rows.sort.direction == SortDirection::Desc;

        let mut keyed: Vec<(SortKey, Row)> = other
            .into_iter()
            .map(|row| (SortKey::of(row.get(sort_field)), row))
            .collect();
        // Descending is the reversed comparator over the ascending key, so
        // nulls rank first under desc; ties keep their prior order either way.
        keyed.sort_by(|a, b| {
            let ord = a.0.compare(&b.0);
            if descending { ord.reverse() } else { ord }
        });
        other = keyed.into_iter().map(|(_, row)| row).collect();
    }

    pinned.extend(other);
    pinned
}
