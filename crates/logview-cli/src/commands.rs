use super::args::{Cli, Commands, ViewCommand};
use super::handlers;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Create {
            root,
            pattern,
            name,
            warning_limit,
        } => {
            let root = resolve_root(&root)?;
            handlers::create::handle(&root, &pattern, &name, warning_limit)
        }

        Commands::Scan {
            root,
            name,
            format,
            warning_limit,
        } => {
            let root = resolve_root(&root)?;
            handlers::scan::handle(&root, name.as_deref(), format, warning_limit)
        }

        Commands::View { command } => match command {
            ViewCommand::List { root } => handlers::view::list(&resolve_root(&root)?),
            ViewCommand::Show { root, name } => handlers::view::show(&resolve_root(&root)?, &name),
            ViewCommand::Copy {
                root,
                from,
                new_name,
            } => handlers::view::copy(&resolve_root(&root)?, &from, &new_name),
            ViewCommand::Rename {
                root,
                old_name,
                new_name,
            } => handlers::view::rename(&resolve_root(&root)?, &old_name, &new_name),
        },
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        bail!(
            "Root path does not exist or is not a directory: {}",
            root.display()
        );
    }
    Ok(root
        .canonicalize()
        .unwrap_or_else(|_| root.to_path_buf()))
}
