//! CRC32 checksums for product records
//!
//! Uses CRC32 (IEEE polynomial). Any mismatch on read is treated as corruption.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
