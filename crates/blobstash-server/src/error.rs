use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tiered_blob_store::StoreError;

/// Application error type that converts to HTTP responses.
///
/// The JSON body keeps a numeric `code` discriminant alongside the HTTP
/// status: `1` not found, `-1` client error, `-2` storage failure.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    AlreadyExists,
    NotFound,
    Store(StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "code": -1, "error": msg }))
            }
            AppError::AlreadyExists => (
                StatusCode::CONFLICT,
                json!({ "code": -1, "error": "filename already exist" }),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "code": 1, "message": "not found" }),
            ),
            AppError::Store(e) => {
                tracing::error!(error = %e, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "code": -2, "error": "storage error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists => AppError::AlreadyExists,
            other => AppError::Store(other),
        }
    }
}
