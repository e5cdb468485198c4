//! # API Errors
//!
//! Not-found answers with a bare 404. Anything else is a server failure and
//! carries a small JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::repository::RepositoryError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No product with the requested id
    #[error("Resource not found")]
    NotFound,

    /// Storage failed underneath the service
    #[error("Internal error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound => status.into_response(),
            ApiError::Repository(ref e) => {
                error!(error = %e, "request failed");
                let body = Json(ErrorResponse {
                    error: self.to_string(),
                    code: status.as_u16(),
                });
                (status, body).into_response()
            }
        }
    }
}
