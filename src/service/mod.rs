//! Application layer
//!
//! One operation per call, delegating to the repository.

mod product;

pub use product::ProductService;
