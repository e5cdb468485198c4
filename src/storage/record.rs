//! Product record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes itself and the checksum)
//! +------------------+
//! | Product ID       | (i64 LE)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Body             | (length-prefixed JSON bytes, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use std::io::{self, Read};

use super::checksum::compute_checksum;
use super::errors::{StorageError, StorageResult};
use crate::model::{Product, ProductId};

/// Smallest possible record: length + id + tombstone + body length + checksum.
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 8 + 1 + 4 + 4;

/// A single entry in the product log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub product_id: ProductId,
    pub is_tombstone: bool,
    /// JSON encoding of the product (empty for tombstones)
    pub body: Vec<u8>,
}

impl ProductRecord {
    /// Builds a live record for a product that already carries its id.
    pub fn live(product_id: ProductId, product: &Product) -> StorageResult<Self> {
        let body = serde_json::to_vec(product)
            .map_err(|source| StorageError::Encoding { product_id, source })?;
        Ok(Self {
            product_id,
            is_tombstone: false,
            body,
        })
    }

    /// Builds a tombstone record marking `product_id` deleted.
    pub fn tombstone(product_id: ProductId) -> Self {
        Self {
            product_id,
            is_tombstone: true,
            body: Vec::new(),
        }
    }

    /// Decodes the body back into a product.
    ///
    /// The record's id is authoritative over whatever the body carries.
    pub fn decode_product(&self) -> Result<Product, serde_json::Error> {
        let product: Product = serde_json::from_slice(&self.body)?;
        Ok(product.with_id(self.product_id))
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + 1 + 4 + self.body.len());
        buf.extend_from_slice(&self.product_id.to_le_bytes());
        buf.push(if self.is_tombstone { 1 } else { 0 });
        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);
        buf
    }

    /// Serializes the complete record, checksum included.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserializes a record from bytes, verifying the checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let mut checksum_buf = [0u8; 4];
        checksum_buf.copy_from_slice(&data[checksum_offset..record_length]);
        let stored_checksum = u32::from_le_bytes(checksum_buf);
        let computed_checksum = compute_checksum(&data[..checksum_offset]);

        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let mut id_buf = [0u8; 8];
        cursor.read_exact(&mut id_buf)?;
        let product_id = i64::from_le_bytes(id_buf);

        let mut tombstone_buf = [0u8; 1];
        cursor.read_exact(&mut tombstone_buf)?;
        let is_tombstone = tombstone_buf[0] != 0;

        let mut len_buf = [0u8; 4];
        cursor.read_exact(&mut len_buf)?;
        let body_len = u32::from_le_bytes(len_buf) as usize;

        let mut body = vec![0u8; body_len];
        cursor.read_exact(&mut body)?;

        Ok((
            Self {
                product_id,
                is_tombstone,
                body,
            },
            record_length,
        ))
    }
}
