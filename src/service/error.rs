//! Error type for record service operations.

use thiserror::Error;

use crate::error::ValidationError;
use crate::ingest::IngestFailure;
use crate::store::StoreError;

/// Everything a service call can fail with, mapped onto HTTP-style status
/// codes by [`ServiceError::status_code`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input failed validation. Nothing was written.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// An ingest run aborted. Rows before the failing one may have landed.
    #[error("ingest failed: {0}")]
    Ingest(#[from] IngestFailure),
    /// The record store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The request could not be decoded.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Anything else on the server side.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::BadRequest(_) => 400,
            ServiceError::Ingest(failure) if failure.error.is_structural() => 422,
            ServiceError::Ingest(_) => 500,
            ServiceError::Store(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }
}
