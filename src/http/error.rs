//! Mapping of service failures to HTTP responses.

use crate::todo::services::TodoServiceError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service rejected or failed the operation.
    #[error(transparent)]
    Service(#[from] TodoServiceError),

    /// The JSON body could not be decoded.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// A `stepId` query value is not an integer.
    #[error("invalid stepId '{0}', expected an integer")]
    InvalidStepId(String),
}

impl ApiError {
    /// Returns the status code this error is answered with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(TodoServiceError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Service(TodoServiceError::Validation(_))
            | Self::MalformedBody(_)
            | Self::InvalidStepId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(err = %self, "request failed");
            return (status, "internal server error").into_response();
        }
        (status, self.to_string()).into_response()
    }
}
