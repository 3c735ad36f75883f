use crate::errors::GenericError;
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<AuthError> for GenericError {
    fn from(err: AuthError) -> GenericError {
        match err {
            AuthError::InvalidCredentials(message) => GenericError::ValidationError(message),
            AuthError::UnexpectedError(error) => GenericError::UnexpectedError(error),
            AuthError::DatabaseError(message, error) => GenericError::DatabaseError(message, error),
        }
    }
}

#[derive(thiserror::Error)]
pub enum UserRegistrationError {
    #[error("{0}")]
    DuplicateAccount(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for UserRegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<UserRegistrationError> for GenericError {
    fn from(err: UserRegistrationError) -> GenericError {
        match err {
            UserRegistrationError::DuplicateAccount(message) => {
                GenericError::ValidationError(message)
            }
            UserRegistrationError::UnexpectedError(error) => GenericError::UnexpectedError(error),
            UserRegistrationError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
        }
    }
}
