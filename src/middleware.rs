use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{http, web, Error, HttpMessage};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::configuration::SecretSetting;
use crate::errors::GenericError;
use crate::routes::user::schemas::{UserAccount, UserRole};
use crate::routes::user::utils::fetch_user_by_id;
use crate::schemas::Status;
use crate::utils::decode_token;

pub struct AuthMiddleware<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .cookie("token")
            .map(|c| c.value().to_string())
            .or_else(|| {
                req.headers()
                    .get(http::header::AUTHORIZATION)
                    .and_then(|h| h.to_str().ok())
                    .and_then(|h| h.strip_prefix("Bearer "))
                    .map(|t| t.to_string())
            });

        let token = match token {
            Some(token) => token,
            None => {
                let (request, _pl) = req.into_parts();
                let json_error =
                    GenericError::ValidationError("Authorization token is missing".to_string());
                return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
            }
        };

        let jwt_secret = req
            .app_data::<web::Data<SecretSetting>>()
            .map(|secret| secret.jwt.secret.clone());
        let jwt_secret = match jwt_secret {
            Some(secret) => secret,
            None => {
                let (request, _pl) = req.into_parts();
                let json_error = GenericError::UnexpectedCustomError(
                    "JWT secret is not configured".to_string(),
                );
                return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
            }
        };

        let user_id = match decode_token(token, &jwt_secret) {
            Ok(id) => id,
            Err(e) => {
                return Box::pin(async move {
                    let (request, _pl) = req.into_parts();
                    Ok(ServiceResponse::from_err(
                        GenericError::InvalidJWT(e.to_string()),
                        request,
                    ))
                });
            }
        };

        let srv = Rc::clone(&self.service);
        Box::pin(async move {
            let db_pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or_else(|| {
                    GenericError::UnexpectedCustomError(
                        "Database pool is not configured".to_string(),
                    )
                })?
                .clone();
            let user = fetch_user_by_id(&db_pool, user_id)
                .await
                .map_err(GenericError::UnexpectedError)?
                .ok_or_else(|| {
                    GenericError::InvalidJWT("Token refers to an unknown user".to_string())
                })?;
            if user.is_active == Status::Inactive {
                return Err(GenericError::ValidationError(
                    "User is inactive. Please contact customer support".to_string(),
                ))?;
            } else if user.is_deleted {
                return Err(GenericError::ValidationError(
                    "User is deleted. Please contact customer support".to_string(),
                ))?;
            }

            req.extensions_mut().insert::<UserAccount>(user);

            let res = srv.call(req).await?;
            Ok(res)
        })
    }
}

/// Middleware factory for requiring authentication.
pub struct RequireAuth;

impl<S> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

// Middleware to restrict a route to a fixed set of roles. Runs after
// RequireAuth, which puts the UserAccount into the request extensions.
pub struct RoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<UserRole>,
}

impl<S> Service<ServiceRequest> for RoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let role = req
            .extensions()
            .get::<UserAccount>()
            .map(|user| user.role);
        let allowed = match role {
            Some(role) => self.allowed_roles.contains(&role),
            None => false,
        };
        if !allowed {
            let (request, _pl) = req.into_parts();
            let json_error = GenericError::InsufficientPrivilegeError(
                "You do not have sufficient privilege to perform this action".to_string(),
            );
            return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
        }
        let srv = Rc::clone(&self.service);
        Box::pin(async move {
            let res = srv.call(req).await?;
            Ok(res)
        })
    }
}

pub struct RoleValidation {
    pub allowed_roles: Vec<UserRole>,
}

impl<S> Transform<S, ServiceRequest> for RoleValidation
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = RoleMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

// Sellers must be verified by an admin before touching product or order
// management routes. Non-seller roles pass through untouched.
pub struct VerifiedSellerMiddleware<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for VerifiedSellerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let rejected = req
            .extensions()
            .get::<UserAccount>()
            .map(|user| user.role == UserRole::Seller && !user.seller_verified)
            .unwrap_or(true);
        if rejected {
            let (request, _pl) = req.into_parts();
            let json_error = GenericError::InsufficientPrivilegeError(
                "Seller account is not verified. Please contact the marketplace admin".to_string(),
            );
            return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
        }
        let srv = Rc::clone(&self.service);
        Box::pin(async move {
            let res = srv.call(req).await?;
            Ok(res)
        })
    }
}

pub struct VerifiedSellerValidation;

impl<S> Transform<S, ServiceRequest> for VerifiedSellerValidation
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = VerifiedSellerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(VerifiedSellerMiddleware {
            service: Rc::new(service),
        }))
    }
}
