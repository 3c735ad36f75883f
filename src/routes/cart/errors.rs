use crate::errors::GenericError;
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum CartError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    InsufficientStockError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    OwnershipError(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<CartError> for GenericError {
    fn from(err: CartError) -> GenericError {
        match err {
            CartError::ValidationError(message) => GenericError::ValidationError(message),
            CartError::InsufficientStockError(message) => GenericError::ValidationError(message),
            CartError::NotFoundError(message) => GenericError::DataNotFound(message),
            CartError::OwnershipError(message) => {
                GenericError::InsufficientPrivilegeError(message)
            }
            CartError::DatabaseError(message, error) => GenericError::DatabaseError(message, error),
        }
    }
}
