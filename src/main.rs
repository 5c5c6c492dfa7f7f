//! Tuneshelf - a console music library manager.
//!
//! Keeps songs and playlists in a JSON file and resolves new songs against
//! an external track catalog. Runs an interactive menu by default; see
//! `--help` for the one-shot commands.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod storage;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log targets used across the crate (module path and explicit `target:`s).
const LOG_TARGETS: &[&str] = &["tuneshelf", "cli", "config", "library", "catalog", "storage"];

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging on stderr so it doesn't interleave with menu output
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_log_filter(args.verbose))?,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}

fn default_log_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(LOG_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}
