use axum::{http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::error::PostServiceError;

/// Errors surfaced at the HTTP boundary. Neither carries a body.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    NotFound,
    ServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        status_code.into_response()
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, message: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for Result<T, PostServiceError> {
    fn into_response(self, message: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(task = message, err = e.to_string());
            ApiError::ServerError
        })
    }
}
