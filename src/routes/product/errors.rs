use crate::errors::GenericError;
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum ProductError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for ProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<ProductError> for GenericError {
    fn from(err: ProductError) -> GenericError {
        match err {
            ProductError::ValidationError(message) => GenericError::ValidationError(message),
            ProductError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
        }
    }
}
