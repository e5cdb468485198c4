//! # HTTP Server Module
//!
//! Axum server exposing the product API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/v1/product` - Product CRUD

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod product_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use product_routes::{product_routes, PRODUCT_BASE_PATH};
pub use server::HttpServer;
