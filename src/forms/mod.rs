//! Form definitions backing the companies routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod companies;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid sales owner id")]
    InvalidSalesOwnerId,

    #[error("invalid url")]
    InvalidUrl,
}
