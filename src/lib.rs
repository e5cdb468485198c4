//! product-inventory - a product CRUD service over HTTP
//!
//! Layers, each constructed explicitly with the one below it:
//!
//! - [`http_server`]: axum routes under `/v1/product`
//! - [`service`]: one operation per request
//! - [`repository`]: keyed product store, in memory or on disk
//! - [`storage`]: append-only checksummed product log

pub mod cli;
pub mod http_server;
pub mod model;
pub mod repository;
pub mod service;
pub mod storage;
