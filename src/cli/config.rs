//! Configuration file
//!
//! ```json
//! {
//!   "storage": { "backend": "file", "data_dir": "./data" },
//!   "http": { "host": "0.0.0.0", "port": 8080, "cors_origins": [] }
//! }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::repository::{FileProductRepository, InMemoryProductRepository, ProductRepository};

/// Where products are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Durable product log under `data_dir`
    File {
        #[serde(default = "default_data_dir")]
        data_dir: String,
    },
    /// Lost on exit
    Memory,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::File {
            data_dir: default_data_dir(),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if let StorageConfig::File { data_dir } = &self.storage {
            if data_dir.trim().is_empty() {
                return Err(CliError::config_error("storage.data_dir must not be empty"));
            }
        }

        Ok(())
    }

    /// Write as pretty JSON
    pub fn write(&self, path: &Path) -> CliResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Data directory, when the backend has one
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.storage {
            StorageConfig::File { data_dir } => Some(Path::new(data_dir)),
            StorageConfig::Memory => None,
        }
    }

    /// Open the configured repository
    pub fn open_repository(&self) -> CliResult<Arc<dyn ProductRepository>> {
        match self.data_dir() {
            Some(data_dir) => Ok(Arc::new(FileProductRepository::open(data_dir)?)),
            None => Ok(Arc::new(InMemoryProductRepository::new())),
        }
    }
}
