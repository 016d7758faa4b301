//! Filesystem scanner: walks a project root, matches file paths against a
//! view's regex, and parses each match as a flat JSON object. Structured
//! field values are coerced to null with a per-file warning; a bad file
//! never aborts the scan.

pub mod error;

pub use error::{Error, Result};

use logview_types::{Record, Scalar};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Directory names skipped during the walk unless overridden.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// One per-file problem encountered during a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanWarning {
    /// Root-relative path of the offending file.
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanSummary {
    pub total_files: usize,
    pub matched_files: usize,
    pub parsed_records: usize,
    pub warning_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub records: Vec<Record>,
    pub warnings: Vec<ScanWarning>,
    pub summary: ScanSummary,
}

/// Scan `root` for JSON log files whose root-relative path matches
/// `pattern`, returning flat scalar records plus warnings and counts.
///
/// `ignored_dirs` prunes whole directories by name; `None` uses
/// [`DEFAULT_IGNORED_DIRS`]. Records come back in sorted path order, each
/// with a leading `path` field.
pub fn scan_records(
    root: &Path,
    pattern: &str,
    ignored_dirs: Option<&HashSet<String>>,
) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(Error::InvalidRoot(format!(
            "{} does not exist or is not a directory",
            root.display()
        )));
    }

    let regex = Regex::new(pattern).map_err(|e| Error::Pattern(e.to_string()))?;

    let default_ignored: HashSet<String> = DEFAULT_IGNORED_DIRS
        .iter()
        .map(|s| s.to_string())
        .collect();
    let ignored = ignored_dirs.unwrap_or(&default_ignored);

    let mut records: Vec<Record> = Vec::new();
    let mut warnings: Vec<ScanWarning> = Vec::new();
    let mut total_files = 0;
    let mut matched_files = 0;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry.depth() > 0
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| ignored.contains(name)))
        });

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        total_files += 1;

        let rel_path = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
            Err(_) => continue,
        };
        if !regex.is_match(&rel_path) {
            continue;
        }
        matched_files += 1;

        let parsed = std::fs::read_to_string(entry.path())
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                serde_json::from_str::<serde_json::Value>(&raw).map_err(|e| e.to_string())
            });
        let value = match parsed {
            Ok(value) => value,
            Err(message) => {
                warnings.push(ScanWarning {
                    path: rel_path,
                    message: format!("Failed to parse JSON file: {}", message),
                });
                continue;
            }
        };

        let Some(object) = value.as_object() else {
            warnings.push(ScanWarning {
                path: rel_path,
                message: "JSON root is not an object; file skipped".to_string(),
            });
            continue;
        };

        let mut record = Record::new();
        record.insert("path".to_string(), Scalar::Str(rel_path.clone()));
        for (key, value) in object {
            match Scalar::from_json(value) {
                Some(scalar) => {
                    record.insert(key.clone(), scalar);
                }
                None => {
                    record.insert(key.clone(), Scalar::Null);
                    warnings.push(ScanWarning {
                        path: rel_path.clone(),
                        message: format!(
                            "Field '{}' is not a scalar (array/object); coerced to null",
                            key
                        ),
                    });
                }
            }
        }

        records.push(record);
    }

    let summary = ScanSummary {
        total_files,
        matched_files,
        parsed_records: records.len(),
        warning_count: warnings.len(),
    };

    Ok(ScanResult {
        records,
        warnings,
        summary,
    })
}
