use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logview")]
#[command(about = "Scan JSON log files and view them as configurable tables", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a view and run the first scan
    Create {
        /// Project root to scan
        root: PathBuf,

        #[arg(long, help = "Regex used to match JSON log files")]
        pattern: String,

        #[arg(long, default_value = "default")]
        name: String,

        #[arg(long, default_value = "20", help = "Number of warnings to print")]
        warning_limit: usize,
    },

    /// Scan the project and render the table for a view
    Scan {
        /// Project root to scan
        root: PathBuf,

        #[arg(long, help = "View name (defaults to the configured default view)")]
        name: Option<String>,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,

        #[arg(long, default_value = "20", help = "Number of warnings to print")]
        warning_limit: usize,
    },

    /// Manage saved views
    View {
        #[command(subcommand)]
        command: ViewCommand,
    },
}

#[derive(Subcommand)]
pub enum ViewCommand {
    /// List saved views
    List { root: PathBuf },

    /// Print a view configuration as JSON
    Show {
        root: PathBuf,

        #[arg(long, default_value = "default")]
        name: String,
    },

    /// Create a new view as a copy of an existing one
    Copy {
        root: PathBuf,
        from: String,
        new_name: String,
    },

    /// Rename a view
    Rename {
        root: PathBuf,
        old_name: String,
        new_name: String,
    },
}
