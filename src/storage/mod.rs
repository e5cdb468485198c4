//! Product record storage
//!
//! The storage engine is an append-only record file holding every write ever
//! made to the product table. There are no in-place updates.
//!
//! # Design Principles
//!
//! - Append-only, fsync after every record
//! - Checksum-verified on every read
//! - Latest record wins for the same product id
//! - A tombstone record removes the id from the live set
//!
//! The log lives at `<data_dir>/products.dat`.

mod checksum;
mod errors;
mod reader;
mod record;
mod writer;

use std::path::{Path, PathBuf};

pub use errors::{StorageError, StorageResult};
pub use reader::RecordReader;
pub use record::ProductRecord;
pub use writer::RecordWriter;

/// File name of the product log.
pub const STORAGE_FILE: &str = "products.dat";

/// Returns the log path for a data directory.
pub fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_FILE)
}
