//! View persistence: one JSON file per view under
//! `<root>/.logview/views/<name>.json`.

pub mod error;

pub use error::{Error, Result};

use logview_types::{ViewConfig, view::validate_name};
use std::path::{Path, PathBuf};

/// Per-project hidden directory holding logview state.
pub const STATE_DIR: &str = ".logview";

/// Directory holding a project's saved views.
pub fn views_dir(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join("views")
}

/// File path for a named view. The name is re-validated so a crafted name
/// can never escape the views directory.
pub fn view_path(root: &Path, name: &str) -> Result<PathBuf> {
    validate_name(name)?;
    Ok(views_dir(root).join(format!("{}.json", name.trim())))
}

/// Sorted names of all saved views; empty when none have been created.
pub fn list_views(root: &Path) -> Result<Vec<String>> {
    let base = views_dir(root);
    if !base.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(&base)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Fresh view configuration: `path`-only ordering, no sort, nothing hidden.
pub fn default_view(name: &str, pattern: &str) -> Result<ViewConfig> {
    Ok(ViewConfig::new(name, pattern)?)
}

/// Validate and persist a view, creating the views directory as needed.
/// Returns the path written.
pub fn save_view(root: &Path, view: &ViewConfig) -> Result<PathBuf> {
    view.validate()?;
    let target = view_path(root, &view.name)?;
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(view).map_err(|e| Error::Parse(e.to_string()))?;
    std::fs::write(&target, json)?;
    Ok(target)
}

/// Load a named view, re-running validation on the parsed file.
///
/// A missing file is `Error::NotFound` with a hint naming the command that
/// creates the view; this is deliberately distinct from an IO failure.
pub fn load_view(root: &Path, name: &str) -> Result<ViewConfig> {
    let target = view_path(root, name)?;
    if !target.exists() {
        return Err(Error::NotFound(format!(
            "View '{}' does not exist under root '{}'. Create one with: \
             logview create {} --pattern \"...\" --name \"{}\"",
            name,
            root.display(),
            root.display(),
            name
        )));
    }

    let raw = std::fs::read_to_string(&target)?;
    let view: ViewConfig = serde_json::from_str(&raw)
        .map_err(|e| Error::Parse(format!("{} ({})", target.display(), e)))?;
    view.validate()?;
    Ok(view)
}

/// Create a new view as a copy of an existing one. Refuses to overwrite.
pub fn create_view_from(root: &Path, name: &str, from_name: &str) -> Result<ViewConfig> {
    if view_path(root, name)?.exists() {
        return Err(Error::AlreadyExists(name.trim().to_string()));
    }

    let mut copied = load_view(root, from_name)?;
    copied.name = name.trim().to_string();
    save_view(root, &copied)?;
    Ok(copied)
}

/// Rename a view, removing the old file. Renaming to the same name is a
/// no-op load.
pub fn rename_view(root: &Path, old_name: &str, new_name: &str) -> Result<ViewConfig> {
    let old_path = view_path(root, old_name)?;
    let new_path = view_path(root, new_name)?;
    if old_path == new_path {
        return load_view(root, old_name);
    }

    if !old_path.exists() {
        return Err(Error::NotFound(format!(
            "View '{}' does not exist",
            old_name.trim()
        )));
    }
    if new_path.exists() {
        return Err(Error::AlreadyExists(new_name.trim().to_string()));
    }

    let mut view = load_view(root, old_name)?;
    view.name = new_name.trim().to_string();
    save_view(root, &view)?;
    std::fs::remove_file(&old_path)?;
    Ok(view)
}
