//! Product persistence
//!
//! [`ProductRepository`] is the only persistence seam the service layer sees.
//! Each call is atomic on its own; nothing here spans multiple calls.

mod errors;
mod file;
mod memory;

pub use errors::{RepositoryError, RepositoryResult};
pub use file::FileProductRepository;
pub use memory::InMemoryProductRepository;

use crate::model::{Product, ProductId};

/// Keyed CRUD store for products.
pub trait ProductRepository: Send + Sync {
    /// Every stored product, ascending by id.
    fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// The product with `id`, if stored.
    fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;

    /// Whether a product with `id` is stored.
    fn exists_by_id(&self, id: ProductId) -> RepositoryResult<bool>;

    /// Inserts or replaces a product.
    ///
    /// When `product.id` is `None` or not stored, a fresh id is assigned and
    /// the product is inserted. Otherwise the stored record is replaced in
    /// full. Returns the stored form, id always present.
    fn save(&self, product: Product) -> RepositoryResult<Product>;

    /// Removes the product with `id`. Unknown ids are ignored.
    fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()>;
}
