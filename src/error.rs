// Custom error types and conversions
// This keeps error responses consistent across Axum handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::QueryRejection;
use serde_json::json;
use thiserror::Error;

// Rejections raised while turning query parameters into typed search input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("Unknown value '{value}' for parameter '{param}'")]
    UnknownValue { param: &'static str, value: String },
    #[error("Parameter '{param}' must be a non-negative integer, got '{value}'")]
    InvalidNumber { param: &'static str, value: String },
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
    #[error("Invalid sort '{0}', expected FIELD or FIELD,DIRECTION")]
    InvalidSort(String),
}

// Application error type, converted into HTTP responses
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    InternalServerError(anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl From<ParamError> for AppError {
    fn from(error: ParamError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

// Query strings serde cannot map at all, e.g. a repeated scalar parameter
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => {
                tracing::warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::InternalServerError(e) => {
                // Log the detailed error here, don't expose it to the client
                tracing::error!("Internal server error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
