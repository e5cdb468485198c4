//! CLI-specific error types
//!
//! All CLI errors are fatal: they are printed to stderr and the process exits
//! non-zero.

use std::io;

use thiserror::Error;

use crate::repository::RepositoryError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable, or invalid
    #[error("INVENTORY_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Filesystem or socket failure
    #[error("INVENTORY_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// `init` found an existing configuration file
    #[error("INVENTORY_CLI_ALREADY_INITIALIZED: configuration already exists at {0}")]
    AlreadyInitialized(String),

    /// The repository could not be opened
    #[error("INVENTORY_CLI_BOOT_FAILED: {0}")]
    BootFailed(#[from] RepositoryError),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "INVENTORY_CLI_CONFIG_ERROR",
            Self::Io(_) => "INVENTORY_CLI_IO_ERROR",
            Self::AlreadyInitialized(_) => "INVENTORY_CLI_ALREADY_INITIALIZED",
            Self::BootFailed(_) => "INVENTORY_CLI_BOOT_FAILED",
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::config_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("port must be > 0");
        assert_eq!(err.code_str(), "INVENTORY_CLI_CONFIG_ERROR");
        assert_eq!(
            err.to_string(),
            "INVENTORY_CLI_CONFIG_ERROR: port must be > 0"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: CliError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.code_str(), "INVENTORY_CLI_IO_ERROR");
    }
}
