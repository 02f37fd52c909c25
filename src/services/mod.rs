use thiserror::Error;

use crate::provider::errors::ProviderError;

pub mod companies;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    /// Network or backend failure during a list query or mutation.
    #[error("Backend request failed: {0}")]
    FetchFailed(String),

    #[error("Form error: {0}")]
    Form(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ProviderError> for ServiceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound => ServiceError::NotFound,
            other => ServiceError::FetchFailed(other.to_string()),
        }
    }
}
