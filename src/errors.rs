use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::schemas::GenericResponse;
use crate::utils::error_chain_fmt;

#[allow(clippy::enum_variant_names)]
#[derive(thiserror::Error)]
pub enum GenericError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    InvalidJWT(String),
    #[error("{0}")]
    InsufficientPrivilegeError(String),
    #[error("{0}")]
    DataNotFound(String),
    #[error("{0}")]
    SignatureVerificationError(String),
    #[error("{0}")]
    PaymentGatewayError(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error("{0}")]
    UnexpectedCustomError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GenericError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenericError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GenericError::InvalidJWT(_) => StatusCode::UNAUTHORIZED,
            GenericError::InsufficientPrivilegeError(_) => StatusCode::FORBIDDEN,
            GenericError::DataNotFound(_) => StatusCode::NOT_FOUND,
            GenericError::SignatureVerificationError(_) => StatusCode::BAD_REQUEST,
            GenericError::PaymentGatewayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenericError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
            GenericError::UnexpectedCustomError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenericError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            GenericError::ValidationError(message)
            | GenericError::InvalidJWT(message)
            | GenericError::InsufficientPrivilegeError(message)
            | GenericError::DataNotFound(message)
            | GenericError::SignatureVerificationError(message)
            | GenericError::PaymentGatewayError(message)
            | GenericError::UnexpectedCustomError(message) => message.to_string(),
            GenericError::DatabaseError(message, _err) => message.to_string(),
            GenericError::UnexpectedError(inner_error) => inner_error.to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}

#[derive(thiserror::Error)]
pub enum CustomJWTTokenError {
    #[error("Token expired")]
    Expired,
    #[error("{0}")]
    Invalid(String),
}

impl std::fmt::Debug for CustomJWTTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
