use crate::errors::GenericError;
use crate::utils::error_chain_fmt;

#[allow(clippy::enum_variant_names)]
#[derive(thiserror::Error)]
pub enum CreateOrderError {
    #[error("{0}")]
    EmptyCartError(String),
    #[error("{0}")]
    AddressError(String),
    #[error("{0}")]
    InsufficientStockError(String),
    #[error("{0}")]
    GatewayError(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for CreateOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<CreateOrderError> for GenericError {
    fn from(err: CreateOrderError) -> GenericError {
        match err {
            CreateOrderError::EmptyCartError(message) => GenericError::ValidationError(message),
            CreateOrderError::AddressError(message) => GenericError::ValidationError(message),
            CreateOrderError::InsufficientStockError(message) => {
                GenericError::ValidationError(message)
            }
            CreateOrderError::GatewayError(message) => GenericError::PaymentGatewayError(message),
            CreateOrderError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
        }
    }
}

#[derive(thiserror::Error)]
pub enum OrderStatusError {
    #[error("{0}")]
    OwnershipError(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for OrderStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<OrderStatusError> for GenericError {
    fn from(err: OrderStatusError) -> GenericError {
        match err {
            OrderStatusError::OwnershipError(message) => {
                GenericError::InsufficientPrivilegeError(message)
            }
            OrderStatusError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
        }
    }
}
