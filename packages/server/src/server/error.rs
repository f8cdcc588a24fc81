//! HTTP error responses.
//!
//! Every error body has the shape `{"detail": "..."}`.

use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body missing, malformed, or failing validation
    #[error("{0}")]
    Validation(String),

    /// Body refused before validation (wrong content type, unreadable body)
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    /// Anything not anticipated by the handlers
    #[error("Error processing request: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                ApiError::Validation(rejection.body_text())
            }
            other => ApiError::Rejected {
                status: other.status(),
                detail: other.body_text(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(detail) | ApiError::Rejected { detail, .. } => {
                tracing::debug!(detail = %detail, "Rejected request")
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Request failed")
            }
        }

        let status = self.status_code();
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Turns a handler panic into a 500 with the panic message as detail.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(message).into_response()
}
