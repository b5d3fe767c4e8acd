//! HTTP error responses.
//!
//! Bodies are plain text. Server-side failures never expose their cause;
//! they carry a correlation reference that is logged next to the error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::domains::listings::ListingError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Message is returned to the client verbatim
    #[error("{0}")]
    BadRequest(String),

    #[error("restaurant not found")]
    NotFound,

    #[error("There was a problem saving your entry: ID: {0}")]
    SaveFailed(Uuid),

    #[error("There was a problem generating results: ID: {0}")]
    QueryFailed(Uuid),

    #[error("There was a problem approving the entry: ID: {0}")]
    ApproveFailed(Uuid),
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::SaveFailed(_) | Self::QueryFailed(_) | Self::ApproveFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Log a read-path failure and hide it behind a fresh reference
    pub fn query_failed(err: &anyhow::Error) -> Self {
        let reference = Uuid::new_v4();
        error!(error = %err, reference = %reference, "Failed to generate results");
        Self::QueryFailed(reference)
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Validation(errors) => Self::BadRequest(errors.to_string()),
            ListingError::NotFound(_) => Self::NotFound,
            ListingError::InvalidToken(token) => {
                Self::BadRequest(format!("invalid listing id: {}", token))
            }
            other => {
                let reference = Uuid::new_v4();
                error!(error = %other, reference = %reference, "Failed to save listing");
                Self::SaveFailed(reference)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
