//! Handler-boundary error type.
//!
//! Every handler returns `Result<_, BffError>`. The status code is chosen
//! from the variant, never from the message text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// A client input error carrying the status it must be answered with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BffValidationError {
    pub message: String,
    pub status: StatusCode,
}

impl BffValidationError {
    /// A 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// Error for a required query parameter that is absent or blank.
    pub fn missing(param: &str) -> Self {
        Self::bad_request(format!("Missing required parameter: {param}"))
    }
}

#[derive(Debug, Error)]
pub enum BffError {
    #[error(transparent)]
    Validation(#[from] BffValidationError),

    /// No entity matched; raised explicitly where the lookup comes back empty.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Upstream failure on a route with no 404 contract; always 500.
    #[error(transparent)]
    UpstreamFailure(UpstreamError),

    #[error("{0}")]
    Internal(String),
}

/// Message sent to clients for any 500-class upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Upstream service unavailable";

pub type BffResult<T> = Result<T, BffError>;

impl BffError {
    pub fn status(&self) -> StatusCode {
        match self {
            BffError::Validation(v) => v.status,
            BffError::NotFound(_) => StatusCode::NOT_FOUND,
            BffError::Upstream(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            BffError::Upstream(_) | BffError::UpstreamFailure(_) | BffError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text for the response body. Upstream failures stay in the logs.
    fn public_message(&self) -> String {
        match self {
            BffError::Upstream(e) if e.is_not_found() => self.to_string(),
            BffError::Upstream(_) | BffError::UpstreamFailure(_) => {
                UPSTREAM_FAILURE_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            BffError::Validation(_) => "VALIDATION_ERROR",
            BffError::NotFound(_) => "NOT_FOUND",
            BffError::Upstream(e) if e.is_not_found() => "NOT_FOUND",
            BffError::Upstream(_) | BffError::UpstreamFailure(_) => "UPSTREAM_ERROR",
            BffError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for BffError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            BffError::Upstream(e) | BffError::UpstreamFailure(e) if status.is_server_error() => {
                tracing::error!(upstream = %e.upstream(), error = %e, "Upstream request failed");
            }
            BffError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
            _ => {
                tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
            }
        }

        let body = json!({
            "error": self.public_message(),
            "code": self.code(),
        });

        (status, Json(body)).into_response()
    }
}
