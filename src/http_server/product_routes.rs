//! Product HTTP Routes
//!
//! | Method | Path              | Success | Failure |
//! |--------|-------------------|---------|---------|
//! | GET    | /v1/product       | 200     |         |
//! | GET    | /v1/product/:id   | 200     | 404     |
//! | POST   | /v1/product       | 201     |         |
//! | PUT    | /v1/product/:id   | 200     | 404     |
//! | DELETE | /v1/product/:id   | 204     | 404     |
//!
//! Bodies that are not valid product JSON and ids that are not integers are
//! rejected by axum's extractors before a handler runs.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use crate::model::{Product, ProductId};
use crate::service::ProductService;

/// Resource path prefix.
pub const PRODUCT_BASE_PATH: &str = "/v1/product";

/// Create product routes
pub fn product_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            PRODUCT_BASE_PATH,
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            &format!("{}/:id", PRODUCT_BASE_PATH),
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .with_state(service)
}

async fn list_products_handler(
    State(service): State<Arc<ProductService>>,
) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(service.list()?))
}

async fn get_product_handler(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    service.get(id)?.map(Json).ok_or(ApiError::NotFound)
}

async fn create_product_handler(
    State(service): State<Arc<ProductService>>,
    Json(request): Json<Product>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let created = service.create(request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_product_handler(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<ProductId>,
    Json(request): Json<Product>,
) -> ApiResult<Json<Product>> {
    service.update(id, request)?.map(Json).ok_or(ApiError::NotFound)
}

async fn delete_product_handler(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<ProductId>,
) -> ApiResult<StatusCode> {
    if service.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
