use thiserror::Error;

use crate::storage::StorageError;

/// Repository errors. None of these are part of the CRUD contract.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A thread panicked while holding the repository lock
    #[error("repository lock poisoned")]
    LockPoisoned,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
