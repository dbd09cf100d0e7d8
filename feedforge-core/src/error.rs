// feedforge-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    // --- DOMAIN ERRORS (records, schemas, configuration values) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementations keep `?` ergonomic on raw I/O and codec calls
impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<csv::Error> for FeedError {
    fn from(err: csv::Error) -> Self {
        FeedError::Infrastructure(InfrastructureError::Csv(err))
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Infrastructure(InfrastructureError::Json(err))
    }
}
