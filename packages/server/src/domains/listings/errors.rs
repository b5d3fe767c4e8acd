use thiserror::Error;

use crate::common::ListingId;
use crate::domains::listings::data::ValidationErrors;

/// Failures of the publication workflow.
///
/// Only `Validation` is safe to show to the submitter verbatim; the HTTP
/// layer reduces `Resolution` and `Persistence` to an opaque reference.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Location resolution failed: {0}")]
    Resolution(#[source] anyhow::Error),

    #[error("Listing not found: {0}")]
    NotFound(ListingId),

    #[error("Invalid approval token: {0:?}")]
    InvalidToken(String),

    #[error("Database error: {0}")]
    Persistence(#[source] anyhow::Error),
}
