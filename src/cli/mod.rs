//! Command-line interface for tuneshelf.
//!
//! With no subcommand the interactive menu starts; the other subcommands
//! are one-shot views over the library file and the catalog.

mod commands;
mod console;

pub use commands::{Cli, Commands, run_command};
