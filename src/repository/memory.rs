//! Volatile repository, used for tests and `"backend": "memory"` deployments.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{ProductRepository, RepositoryError, RepositoryResult};
use crate::model::{Product, ProductId};

struct MemoryState {
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

/// Products held in an ordered map. Ids start at 1 and are never reused.
pub struct InMemoryProductRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let state = self.state.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(state.products.values().cloned().collect())
    }

    fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.state.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(state.products.get(&id).cloned())
    }

    fn exists_by_id(&self, id: ProductId) -> RepositoryResult<bool> {
        let state = self.state.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(state.products.contains_key(&id))
    }

    fn save(&self, product: Product) -> RepositoryResult<Product> {
        let mut state = self.state.write().map_err(|_| RepositoryError::LockPoisoned)?;

        let id = match product.id {
            Some(id) if state.products.contains_key(&id) => id,
            _ => {
                let id = state.next_id;
                state.next_id += 1;
                id
            }
        };

        let stored = product.with_id(id);
        state.products.insert(id, stored.clone());
        Ok(stored)
    }

    fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(|_| RepositoryError::LockPoisoned)?;
        state.products.remove(&id);
        Ok(())
    }
}
