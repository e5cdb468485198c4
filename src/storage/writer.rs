//! Append-only writer for the product log
//!
//! Every record is fsynced before `append` returns. A write is never
//! acknowledged unless it is durable, and a failed write never stays in the
//! log: the file is cut back to the end of the last acknowledged record.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::errors::{StorageError, StorageResult};
use super::record::ProductRecord;
use super::storage_path;

/// Appends records to `<data_dir>/products.dat`.
pub struct RecordWriter {
    storage_path: PathBuf,
    file: File,
    current_offset: u64,
}

impl RecordWriter {
    /// Opens or creates the log under `data_dir`.
    ///
    /// Creates `data_dir` if needed.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let storage_path = storage_path(data_dir);

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| {
                StorageError::io(
                    format!("Failed to create data directory: {}", data_dir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&storage_path)
            .map_err(|e| {
                StorageError::io(
                    format!("Failed to open storage file: {}", storage_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::io("Failed to read file metadata", e))?
            .len();

        Ok(Self {
            storage_path,
            file,
            current_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// End of the last acknowledged record.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends a record and fsyncs.
    ///
    /// Returns the byte offset where the record starts. On failure the file
    /// is truncated back to that offset before the error is returned.
    pub fn append(&mut self, record: &ProductRecord) -> StorageResult<u64> {
        self.discard_unacknowledged_tail()?;

        let serialized = record.serialize();
        let offset = self.current_offset;

        if let Err(err) = self.write_durable(record, &serialized) {
            if let Err(e) = self.file.set_len(offset) {
                // Retried by the next append.
                warn!(offset, error = %e, "failed to truncate log after write error");
            }
            return Err(err);
        }

        self.current_offset += serialized.len() as u64;

        Ok(offset)
    }

    fn write_durable(&mut self, record: &ProductRecord, bytes: &[u8]) -> StorageResult<()> {
        self.file.write_all(bytes).map_err(|e| {
            StorageError::io(
                format!("Failed to write record for product {}", record.product_id),
                e,
            )
        })?;

        self.file.sync_all().map_err(|e| {
            StorageError::io(
                format!(
                    "fsync failed after writing record for product {}",
                    record.product_id
                ),
                e,
            )
        })
    }

    /// Cuts off bytes past `current_offset` left by an earlier failed append.
    fn discard_unacknowledged_tail(&mut self) -> StorageResult<()> {
        let len = self
            .file
            .metadata()
            .map_err(|e| StorageError::io("Failed to read file metadata", e))?
            .len();

        if len > self.current_offset {
            warn!(
                offset = self.current_offset,
                discarded = len - self.current_offset,
                "discarding partial record at end of log"
            );
            self.file.set_len(self.current_offset).map_err(|e| {
                StorageError::io(
                    format!("Failed to truncate log to offset {}", self.current_offset),
                    e,
                )
            })?;
        }

        Ok(())
    }

    /// Replaces the underlying file handle, returning the previous one.
    #[cfg(test)]
    pub(crate) fn replace_file(&mut self, file: File) -> File {
        std::mem::replace(&mut self.file, file)
    }
}
