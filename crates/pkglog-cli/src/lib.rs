mod args;
mod commands;
mod handlers;

pub use args::{Cli, Commands, ExportFormat};
pub use commands::run;
