//! Product operations
//!
//! `update` and `delete` check existence in a separate repository call before
//! writing. The pair is not atomic: two concurrent requests on the same id can
//! interleave between the check and the write.

use std::sync::Arc;

use tracing::debug;

use crate::model::{Product, ProductId};
use crate::repository::{ProductRepository, RepositoryResult};

/// CRUD operations over products.
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// All products in storage order.
    pub fn list(&self) -> RepositoryResult<Vec<Product>> {
        self.repository.find_all()
    }

    /// The product with `id`, or `None`.
    pub fn get(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        self.repository.find_by_id(id)
    }

    /// Stores a new product. Any id in the request is discarded.
    pub fn create(&self, mut product: Product) -> RepositoryResult<Product> {
        product.id = None;
        let created = self.repository.save(product)?;
        debug!(id = ?created.id, "product created");
        Ok(created)
    }

    /// Overwrites the five non-id fields of an existing product.
    ///
    /// Returns `None` without writing when `id` is not stored.
    pub fn update(&self, id: ProductId, request: Product) -> RepositoryResult<Option<Product>> {
        let Some(mut existing) = self.repository.find_by_id(id)? else {
            debug!(id, "update skipped, product not found");
            return Ok(None);
        };

        existing.overwrite_fields(request);
        let updated = self.repository.save(existing)?;
        debug!(id, "product updated");
        Ok(Some(updated))
    }

    /// Deletes the product with `id`.
    ///
    /// Returns `false` without writing when `id` is not stored.
    pub fn delete(&self, id: ProductId) -> RepositoryResult<bool> {
        if !self.repository.exists_by_id(id)? {
            debug!(id, "delete skipped, product not found");
            return Ok(false);
        }

        self.repository.delete_by_id(id)?;
        debug!(id, "product deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::repository::InMemoryProductRepository;

    /// Wraps the in-memory repository and records every write.
    #[derive(Default)]
    struct RecordingRepository {
        inner: InMemoryProductRepository,
        saves: Mutex<Vec<Product>>,
        deletes: Mutex<Vec<ProductId>>,
    }

    impl ProductRepository for RecordingRepository {
        fn find_all(&self) -> RepositoryResult<Vec<Product>> {
            self.inner.find_all()
        }

        fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
            self.inner.find_by_id(id)
        }

        fn exists_by_id(&self, id: ProductId) -> RepositoryResult<bool> {
            self.inner.exists_by_id(id)
        }

        fn save(&self, product: Product) -> RepositoryResult<Product> {
            self.saves.lock().unwrap().push(product.clone());
            self.inner.save(product)
        }

        fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
            self.deletes.lock().unwrap().push(id);
            self.inner.delete_by_id(id)
        }
    }

    fn laptop() -> Product {
        Product::new("Laptop", "High-performance laptop", "EL", 10, 999.99)
    }

    fn setup() -> (Arc<RecordingRepository>, ProductService) {
        let repo = Arc::new(RecordingRepository::default());
        let service = ProductService::new(repo.clone());
        (repo, service)
    }

    #[test]
    fn test_create_product() {
        let (repo, service) = setup();

        let created = service.create(laptop()).unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.name.as_deref(), Some("Laptop"));
        assert_eq!(repo.saves.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_create_ignores_supplied_id() {
        let (_repo, service) = setup();
        let first = service.create(laptop()).unwrap();

        let second = service.create(laptop().with_id(first.id.unwrap())).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_get_product_by_id() {
        let (_repo, service) = setup();
        let created = service.create(laptop()).unwrap();

        let found = service.get(created.id.unwrap()).unwrap().unwrap();

        assert_eq!(found, created);
        assert!(service.get(999_999).unwrap().is_none());
    }

    #[test]
    fn test_update_product() {
        let (repo, service) = setup();
        let created = service.create(laptop()).unwrap();
        let id = created.id.unwrap();

        let request = Product::new("Laptop2", "Thinner", "EL2", 5, 899.0).with_id(12345);
        let updated = service.update(id, request).unwrap().unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.name.as_deref(), Some("Laptop2"));
        assert_eq!(updated.description.as_deref(), Some("Thinner"));
        assert_eq!(updated.product_type.as_deref(), Some("EL2"));
        assert_eq!(updated.quantity, Some(5));
        assert_eq!(updated.unit_price, Some(899.0));
        // one save for create, one for update
        assert_eq!(repo.saves.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_update_overwrites_with_absent_fields() {
        let (_repo, service) = setup();
        let id = service.create(laptop()).unwrap().id.unwrap();

        let request = Product {
            name: Some("Bare".to_string()),
            ..Default::default()
        };
        let updated = service.update(id, request).unwrap().unwrap();

        assert_eq!(updated.name.as_deref(), Some("Bare"));
        assert!(updated.description.is_none());
        assert!(updated.unit_price.is_none());
    }

    #[test]
    fn test_update_product_not_found() {
        let (repo, service) = setup();

        let result = service.update(3, laptop()).unwrap();

        assert!(result.is_none());
        assert!(repo.saves.lock().unwrap().is_empty());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_product() {
        let (repo, service) = setup();
        let id = service.create(laptop()).unwrap().id.unwrap();

        assert!(service.delete(id).unwrap());
        assert_eq!(*repo.deletes.lock().unwrap(), vec![id]);
        assert!(service.get(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_product_not_found() {
        let (repo, service) = setup();
        service.create(laptop()).unwrap();

        assert!(!service.delete(1_000).unwrap());
        assert!(repo.deletes.lock().unwrap().is_empty());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_list_returns_every_created_product() {
        let (_repo, service) = setup();
        assert!(service.list().unwrap().is_empty());

        for _ in 0..5 {
            service.create(laptop()).unwrap();
        }

        let all = service.list().unwrap();
        let mut ids: Vec<_> = all.iter().filter_map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(all.len(), 5);
        assert_eq!(ids.len(), 5);
    }
}
