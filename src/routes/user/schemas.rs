use actix_http::Payload;
use actix_web::web::Json;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::errors::GenericError;
use crate::schemas::Status;

/// Closed role set, the single source of truth for authorization.
///
/// Roles are flat: there is no hierarchy, an admin is not a superset of a
/// seller. Normalized once at registration, never string-compared.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Seller,
    Admin,
    SuperAdmin,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub mobile_no: String,
    pub role: UserRole,
    pub is_active: Status,
    pub is_deleted: bool,
    pub seller_verified: bool,
}

impl FromRequest for UserAccount {
    type Error = GenericError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let value = req.extensions().get::<UserAccount>().cloned();
        let result = match value {
            Some(user) => Ok(user),
            None => Err(GenericError::UnexpectedCustomError(
                "Something went wrong while parsing user account detail".to_string(),
            )),
        };
        ready(result)
    }
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserAccount {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7, max = 15))]
    pub mobile_no: String,
    #[schema(value_type = String)]
    pub password: SecretString,
    /// Registers the account as a seller; sellers start unverified.
    #[serde(default)]
    pub register_as_seller: bool,
}

impl FromRequest for CreateUserAccount {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => {
                    let body = json.into_inner();
                    body.validate()
                        .map_err(|e| GenericError::ValidationError(e.to_string()))?;
                    Ok(body)
                }
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub email: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}

impl FromRequest for AuthenticateRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => Ok(json.into_inner()),
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub token: String,
    pub user: UserAccount,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    #[validate(length(min = 1, max = 200))]
    pub address_line: String,
    #[validate(length(min = 1, max = 80))]
    pub city: String,
    #[validate(length(min = 1, max = 80))]
    pub state: String,
    #[validate(length(min = 3, max = 12))]
    pub pincode: String,
    #[validate(length(min = 2, max = 80))]
    pub country: String,
}

impl FromRequest for CreateAddressRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => {
                    let body = json.into_inner();
                    body.validate()
                        .map_err(|e| GenericError::ValidationError(e.to_string()))?;
                    Ok(body)
                }
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}
