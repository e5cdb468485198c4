//! CLI module
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Open storage and run the HTTP server

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{init, run_command, serve};
pub use config::{Config, StorageConfig};
pub use errors::{CliError, CliResult};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    setup_tracing();
    let cli = Cli::parse_args();
    run_command(cli.command)
}
