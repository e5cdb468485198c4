//! Storage error types
//!
//! Error codes:
//! - INVENTORY_STORAGE_IO_ERROR (ERROR severity)
//! - INVENTORY_STORAGE_ENCODING_FAILED (ERROR severity)
//! - INVENTORY_DATA_CORRUPTION (FATAL severity)

use std::io;

use thiserror::Error;

use crate::model::ProductId;

/// Errors raised by the record log.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Disk I/O failure while opening, writing, or syncing the log
    #[error("INVENTORY_STORAGE_IO_ERROR: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// A product could not be encoded into a record body
    #[error("INVENTORY_STORAGE_ENCODING_FAILED: product {product_id}: {source}")]
    Encoding {
        product_id: ProductId,
        #[source]
        source: serde_json::Error,
    },

    /// The log contains bytes that do not form a valid record
    #[error("INVENTORY_DATA_CORRUPTION: {reason} (byte_offset: {offset})")]
    Corruption { offset: u64, reason: String },
}

impl StorageError {
    /// I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Corruption detected at a byte offset
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "INVENTORY_STORAGE_IO_ERROR",
            Self::Encoding { .. } => "INVENTORY_STORAGE_ENCODING_FAILED",
            Self::Corruption { .. } => "INVENTORY_DATA_CORRUPTION",
        }
    }

    /// Corruption means the log cannot be trusted; the process must not serve from it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Corruption { .. })
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
