use crate::errors::GenericError;
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum PaymentVerificationError {
    #[error("{0}")]
    SignatureError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    OwnershipError(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for PaymentVerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<PaymentVerificationError> for GenericError {
    fn from(err: PaymentVerificationError) -> GenericError {
        match err {
            PaymentVerificationError::SignatureError(message) => {
                GenericError::SignatureVerificationError(message)
            }
            PaymentVerificationError::NotFoundError(message) => {
                GenericError::DataNotFound(message)
            }
            PaymentVerificationError::OwnershipError(message) => {
                GenericError::InsufficientPrivilegeError(message)
            }
            PaymentVerificationError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
        }
    }
}
