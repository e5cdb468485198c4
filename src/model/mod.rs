//! Domain model for the product inventory
//!
//! There is a single managed entity, [`Product`].

mod product;

pub use product::{Product, ProductId};
