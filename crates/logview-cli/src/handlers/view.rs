use anyhow::Result;
use logview_store::{create_view_from, list_views, load_view, rename_view, view_path};
use std::path::Path;

pub fn list(root: &Path) -> Result<()> {
    let names = list_views(root)?;
    if names.is_empty() {
        println!("No views saved under {}", root.display());
        println!("Create one with: logview create {} --pattern \"...\"", root.display());
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub fn show(root: &Path, name: &str) -> Result<()> {
    let view = load_view(root, name)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub fn copy(root: &Path, from: &str, new_name: &str) -> Result<()> {
    let view = create_view_from(root, new_name, from)?;
    println!(
        "Copied view '{}' to '{}' at {}",
        from,
        view.name,
        view_path(root, &view.name)?.display()
    );
    Ok(())
}

pub fn rename(root: &Path, old_name: &str, new_name: &str) -> Result<()> {
    let view = rename_view(root, old_name, new_name)?;
    println!("Renamed view '{}' to '{}'", old_name, view.name);
    Ok(())
}
