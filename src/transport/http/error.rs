//! Centralized request-error handling.
//!
//! Every handler returns `Result<_, AppError>`; the single `IntoResponse`
//! impl below logs the failure and emits the uniform JSON envelope, so no
//! request failure can crash the process or leak an unformatted error.

use crate::infra::config;
use crate::storage::PersistenceError;
use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// One or more field rules were violated; carries every message, in rule
    /// order, never just the first.
    #[error("Validation error")]
    Validation(Vec<String>),

    /// The request body could not be parsed at all.
    #[error("{0}")]
    BadRequest(String),

    /// Requested path or resource does not exist. Path-traversal attempts map
    /// here too, indistinguishable from a plain miss.
    #[error("Resource not found")]
    NotFound,

    /// The store failed to read or write durably. Never retried.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let development = config::is_development();
        let (status, message, errors, stack) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation error".to_string(),
                Some(errors),
                None,
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None, None),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Resource not found".to_string(),
                None,
                None,
            ),
            AppError::Persistence(e) => {
                tracing::error!(error = ?e.0, "store failure while handling request");
                let message = if development {
                    e.to_string()
                } else {
                    "Internal server error".to_string()
                };
                let stack = development.then(|| format!("{:?}", e.0));
                (StatusCode::INTERNAL_SERVER_ERROR, message, None, stack)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: true,
                message,
                errors,
                stack,
            }),
        )
            .into_response()
    }
}
