mod args;
mod commands;
pub mod config;
mod handlers;
mod output;
pub mod types;

pub use args::{Cli, Commands, ViewCommand};
pub use commands::run;
