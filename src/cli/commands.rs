//! CLI command implementations
//!
//! `serve` wires the layers explicitly: repository → service → router.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::args::{Command, DEFAULT_CONFIG_PATH};
use super::config::{Config, StorageConfig};
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::service::ProductService;

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Write a default configuration with a data directory beside it.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::AlreadyInitialized(
            config_path.display().to_string(),
        ));
    }

    let data_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("data");
    fs::create_dir_all(&data_dir)?;

    let config = Config {
        storage: StorageConfig::File {
            data_dir: data_dir.display().to_string(),
        },
        ..Default::default()
    };
    config.write(config_path)?;

    info!(config = %config_path.display(), "initialized");
    Ok(())
}

/// Load configuration, open storage, and serve until Ctrl-C.
///
/// An explicit `config_path` must exist.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    if let Some(port) = port {
        config.http.port = port;
    }

    let repository = config.open_repository()?;
    let service = Arc::new(ProductService::new(repository));
    let server = HttpServer::new(config.http.clone(), service);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;

    Ok(())
}
