use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A column derived per row from an expression over that row's other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComputedColumn {
    pub name: String,
    pub expr: String,
}

/// Column presentation: ordering, visibility, labels, display formats and
/// computed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Explicit leading column order. Columns not listed here are appended
    /// in discovery order.
    #[serde(default = "default_order")]
    pub order: Vec<String>,
    /// Columns excluded from `visible_columns` (still present in row data).
    #[serde(default)]
    pub hidden: Vec<String>,
    /// Column name -> display label.
    #[serde(default)]
    pub alias: IndexMap<String, String>,
    /// Column name -> display-format template.
    #[serde(default)]
    pub format: IndexMap<String, String>,
    /// Computed columns, applied in list order.
    #[serde(default)]
    pub computed: Vec<ComputedColumn>,
}

fn default_order() -> Vec<String> {
    vec!["path".to_string()]
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            hidden: Vec::new(),
            alias: IndexMap::new(),
            format: IndexMap::new(),
            computed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortConfig {
    /// Column to sort unpinned rows by. `None` keeps scan order.
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowConfig {
    /// `path` values forced to the head of the table, in this order.
    #[serde(default)]
    pub pinned_ids: Vec<String>,
    #[serde(default)]
    pub sort: SortConfig,
}

/// The persisted, user-editable presentation configuration for one view.
///
/// A loaded config is treated as immutable for the duration of one
/// `apply_view` call; edits produce a new instance which is then persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    /// View identity; doubles as the filename stem in the view store.
    pub name: String,
    /// Regex used by the scanner to match log files. Not used by the engine.
    pub pattern: String,
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub rows: RowConfig,
}

impl ViewConfig {
    /// Default factory: `path`-only ordering, nothing hidden, no sort.
    pub fn new(name: &str, pattern: &str) -> Result<Self> {
        let view = Self {
            name: name.trim().to_string(),
            pattern: pattern.to_string(),
            columns: ColumnConfig::default(),
            rows: RowConfig::default(),
        };
        view.validate()?;
        Ok(view)
    }

    /// Check all configuration invariants, with human-readable messages.
    ///
    /// Call this after deserializing a view file and before persisting one.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;

        if let Err(err) = regex::Regex::new(&self.pattern) {
            return Err(Error::Validation(format!("invalid regex pattern: {}", err)));
        }

        let mut seen_aliases = HashSet::new();
        for alias in self.columns.alias.values() {
            let trimmed = alias.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !seen_aliases.insert(trimmed) {
                return Err(Error::Validation(format!(
                    "alias '{}' is used more than once",
                    trimmed
                )));
            }
        }

        let mut seen_computed = HashSet::new();
        for computed in &self.columns.computed {
            if computed.name.trim().is_empty() {
                return Err(Error::Validation(
                    "computed column name cannot be empty".to_string(),
                ));
            }
            if computed.expr.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "computed column '{}' has an empty expression",
                    computed.name
                )));
            }
            if !seen_computed.insert(computed.name.as_str()) {
                return Err(Error::Validation(format!(
                    "computed column '{}' is defined more than once",
                    computed.name
                )));
            }
        }

        Ok(())
    }
}

/// View names become filename stems, so they must be non-empty and free of
/// path separators.
pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("view name cannot be empty".to_string()));
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(Error::Validation(
            "view name cannot include path separators".to_string(),
        ));
    }
    Ok(())
}
