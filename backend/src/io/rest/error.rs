//! Translation of failures into JSON error responses.
//!
//! Each error kind keeps its own body shape so clients can tell them apart:
//! `{"error": ...}` for routing and internal errors, `{"message": ...}`
//! for missing input, and the bare field map for validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorResponse, MessageResponse, ValidationErrorResponse};
use tracing::error;

use crate::domain::models::expense::ExpenseError;
use crate::domain::validation::ValidationErrors;

pub const NOT_FOUND_MESSAGE: &str = "404 Not Found: The requested URL was not found on the server. \
If you entered the URL manually please check your spelling and try again.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str =
    "405 Method Not Allowed: The method is not allowed for the requested URL.";
pub const NO_INPUT_MESSAGE: &str = "No input data provided";
pub const INTERNAL_ERROR_MESSAGE: &str = "500 Internal Server Error: The server encountered an \
internal error and was unable to complete your request.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("no input data provided")]
    NoInputData,
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::NotFound(_) => ApiError::NotFound,
            ExpenseError::NoInputData => ApiError::NoInputData,
            ExpenseError::Validation(errors) => ApiError::Validation(errors),
            ExpenseError::Storage(source) => ApiError::Internal(source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: NOT_FOUND_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorResponse {
                    error: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            ApiError::NoInputData => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(NO_INPUT_MESSAGE)),
            )
                .into_response(),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse(errors.into_fields())),
            )
                .into_response(),
            ApiError::Internal(source) => {
                error!("Request failed: {:#}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: INTERNAL_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
