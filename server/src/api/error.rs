//! Mapping of service failures onto HTTP responses.
//!
//! Every error body has the shape `{"error": "<message>"}`. Storage
//! failures are logged here and reach the client only as a generic 500.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use taskapi_core::ServiceError;
use thiserror::Error;
use tokio::task::JoinError;

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Task not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::MissingTitle => ApiError::BadRequest(error.to_string()),
            ServiceError::IdSpaceExhausted => {
                tracing::error!("task id space exhausted");
                ApiError::Internal
            }
            ServiceError::Store(source) => {
                tracing::error!(error = %source, "task store failure");
                ApiError::Internal
            }
        }
    }
}

// Every body rejection (bad JSON, wrong types, missing content type, too
// large) is reported as 400 so clients only see the three error statuses.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        tracing::error!(%error, "task service call did not complete");
        ApiError::Internal
    }
}
