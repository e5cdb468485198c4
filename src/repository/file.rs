//! Durable repository backed by the append-only product log.
//!
//! On open the log is replayed into an ordered in-memory map; every mutation
//! is appended and fsynced before the map is updated.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use tracing::{error, info};

use super::{ProductRepository, RepositoryError, RepositoryResult};
use crate::model::{Product, ProductId};
use crate::storage::{
    storage_path, ProductRecord, RecordReader, RecordWriter, StorageError, StorageResult,
};

struct FileState {
    writer: RecordWriter,
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

/// Product repository persisted under a data directory.
pub struct FileProductRepository {
    state: Mutex<FileState>,
}

impl FileProductRepository {
    /// Opens the repository, replaying any existing log.
    ///
    /// Fails with a corruption error if any record fails verification.
    pub fn open(data_dir: &Path) -> RepositoryResult<Self> {
        let path = storage_path(data_dir);
        let (products, next_id) = if path.exists() {
            Self::replay(&path).map_err(|err| {
                error!(
                    code = err.code(),
                    fatal = err.is_fatal(),
                    path = %path.display(),
                    error = %err,
                    "product log replay failed"
                );
                err
            })?
        } else {
            (BTreeMap::new(), 1)
        };

        let writer = RecordWriter::open(data_dir)?;

        info!(
            path = %writer.path().display(),
            products = products.len(),
            next_id,
            "product log opened"
        );

        Ok(Self {
            state: Mutex::new(FileState {
                writer,
                products,
                next_id,
            }),
        })
    }

    /// Rebuilds the live set and the id sequence from the log.
    ///
    /// Latest record per id wins; tombstones remove. The sequence resumes
    /// past every id ever written, deleted ones included.
    fn replay(path: &Path) -> StorageResult<(BTreeMap<ProductId, Product>, ProductId)> {
        let mut reader = RecordReader::open(path)?;
        let mut products = BTreeMap::new();
        let mut next_id: ProductId = 1;

        loop {
            let offset = reader.current_offset();
            let record = match reader.read_next()? {
                Some(record) => record,
                None => break,
            };

            next_id = next_id.max(record.product_id + 1);

            if record.is_tombstone {
                products.remove(&record.product_id);
                continue;
            }

            let product = record.decode_product().map_err(|e| {
                StorageError::corruption_at_offset(offset, format!("Undecodable product body: {}", e))
            })?;
            products.insert(record.product_id, product);
        }

        Ok((products, next_id))
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, FileState>> {
        self.state.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl ProductRepository for FileProductRepository {
    fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.lock()?.products.values().cloned().collect())
    }

    fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.lock()?.products.get(&id).cloned())
    }

    fn exists_by_id(&self, id: ProductId) -> RepositoryResult<bool> {
        Ok(self.lock()?.products.contains_key(&id))
    }

    fn save(&self, product: Product) -> RepositoryResult<Product> {
        let mut state = self.lock()?;

        let (id, is_insert) = match product.id {
            Some(id) if state.products.contains_key(&id) => (id, false),
            _ => (state.next_id, true),
        };

        let stored = product.with_id(id);
        let record = ProductRecord::live(id, &stored)?;

        // A failed insert still consumes its id.
        if is_insert {
            state.next_id = id + 1;
        }
        state.writer.append(&record)?;
        state.products.insert(id, stored.clone());

        Ok(stored)
    }

    fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
        let mut state = self.lock()?;

        if !state.products.contains_key(&id) {
            return Ok(());
        }

        state.writer.append(&ProductRecord::tombstone(id))?;
        state.products.remove(&id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{File, OpenOptions};
    use std::io::{Seek, SeekFrom, Write};

    use super::*;
    use tempfile::TempDir;

    fn laptop() -> Product {
        Product::new("Laptop", "High-performance laptop", "EL", 10, 999.99)
    }

    #[test]
    fn test_open_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileProductRepository::open(temp_dir.path()).unwrap();

        assert!(repo.find_all().unwrap().is_empty());
        assert!(storage_path(temp_dir.path()).exists());
    }

    #[test]
    fn test_products_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = FileProductRepository::open(temp_dir.path()).unwrap();
            repo.save(laptop()).unwrap();
            repo.save(Product::new("Desktop", "Tower", "EL", 3, 1299.0))
                .unwrap();
        }

        let repo = FileProductRepository::open(temp_dir.path()).unwrap();
        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name.as_deref(), Some("Laptop"));
        assert_eq!(all[1].name.as_deref(), Some("Desktop"));
        assert_eq!(all[1].id, Some(2));
    }

    #[test]
    fn test_latest_update_wins_after_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = FileProductRepository::open(temp_dir.path()).unwrap();
            let mut saved = repo.save(laptop()).unwrap();
            saved.quantity = Some(4);
            repo.save(saved).unwrap();
        }

        let repo = FileProductRepository::open(temp_dir.path()).unwrap();
        let product = repo.find_by_id(1).unwrap().unwrap();
        assert_eq!(product.quantity, Some(4));
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_survives_reopen_and_ids_not_reused() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = FileProductRepository::open(temp_dir.path()).unwrap();
            repo.save(laptop()).unwrap();
            repo.save(laptop()).unwrap();
            repo.delete_by_id(2).unwrap();
        }

        let repo = FileProductRepository::open(temp_dir.path()).unwrap();
        assert!(!repo.exists_by_id(2).unwrap());
        assert!(repo.exists_by_id(1).unwrap());

        let next = repo.save(laptop()).unwrap();
        assert_eq!(next.id, Some(3));
    }

    #[test]
    fn test_delete_unknown_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileProductRepository::open(temp_dir.path()).unwrap();
        repo.save(laptop()).unwrap();
        let before = std::fs::metadata(storage_path(temp_dir.path()))
            .unwrap()
            .len();

        repo.delete_by_id(42).unwrap();

        let after = std::fs::metadata(storage_path(temp_dir.path()))
            .unwrap()
            .len();
        assert_eq!(before, after);
    }

    #[test]
    fn test_corrupted_log_refuses_to_open() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = FileProductRepository::open(temp_dir.path()).unwrap();
            repo.save(laptop()).unwrap();
        }

        {
            let mut file = OpenOptions::new()
                .write(true)
                .open(storage_path(temp_dir.path()))
                .unwrap();
            file.seek(SeekFrom::Start(25)).unwrap();
            file.write_all(&[0x00, 0x00]).unwrap();
        }

        match FileProductRepository::open(temp_dir.path()) {
            Err(RepositoryError::Storage(err)) => assert!(err.is_fatal()),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("corrupted log opened"),
        }
    }

    #[test]
    fn test_partial_record_does_not_lose_later_writes() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = FileProductRepository::open(temp_dir.path()).unwrap();
            repo.save(laptop()).unwrap();

            let partial = ProductRecord::live(2, &laptop().with_id(2))
                .unwrap()
                .serialize();
            OpenOptions::new()
                .append(true)
                .open(storage_path(temp_dir.path()))
                .unwrap()
                .write_all(&partial[..10])
                .unwrap();

            let desktop = repo
                .save(Product::new("Desktop", "Tower", "EL", 3, 1299.0))
                .unwrap();
            assert_eq!(desktop.id, Some(2));
        }

        let repo = FileProductRepository::open(temp_dir.path()).unwrap();
        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].name.as_deref(), Some("Desktop"));
    }

    #[test]
    fn test_failed_insert_does_not_reuse_id() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = FileProductRepository::open(temp_dir.path()).unwrap();
            repo.save(laptop()).unwrap();

            let writable = {
                let mut state = repo.lock().unwrap();
                let read_only = File::open(storage_path(temp_dir.path())).unwrap();
                state.writer.replace_file(read_only)
            };

            let failed = repo.save(Product::new("Phone", "Lost", "EL", 1, 1.0));
            assert!(matches!(failed, Err(RepositoryError::Storage(_))));
            assert_eq!(repo.find_all().unwrap().len(), 1);

            repo.lock().unwrap().writer.replace_file(writable);

            let desktop = repo
                .save(Product::new("Desktop", "Tower", "EL", 3, 1299.0))
                .unwrap();
            assert_eq!(desktop.id, Some(3));
        }

        let repo = FileProductRepository::open(temp_dir.path()).unwrap();
        assert!(!repo.exists_by_id(2).unwrap());
        let desktop = repo.find_by_id(3).unwrap().unwrap();
        assert_eq!(desktop.name.as_deref(), Some("Desktop"));
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }
}
