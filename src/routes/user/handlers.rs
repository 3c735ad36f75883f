use actix_web::web;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

use super::schemas::{
    AddressData, AuthData, AuthenticateRequest, CreateAddressRequest, CreateUserAccount,
    UserAccount,
};
use super::utils::{
    fetch_addresses_by_user, fetch_user_by_id, mark_seller_verified, save_address,
    save_user_account, validate_user_credentials,
};
use crate::configuration::SecretSetting;
use crate::errors::GenericError;
use crate::schemas::GenericResponse;
use crate::utils::generate_jwt_token_for_user;

#[utoipa::path(
    post,
    path = "/user/register",
    tag = "User",
    description = "This API registers a customer or seller account.",
    summary = "User Registration Request",
    request_body(content = CreateUserAccount, description = "Request Body"),
    responses(
        (status=200, description= "Account created", body= GenericResponse<UserAccount>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "User registration", skip(pool, body), fields(username = %body.username))]
pub async fn register(
    body: CreateUserAccount,
    pool: web::Data<PgPool>,
) -> Result<web::Json<GenericResponse<UserAccount>>, GenericError> {
    let user = save_user_account(&pool, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully registered user account",
        Some(user),
    )))
}

#[utoipa::path(
    post,
    path = "/user/login",
    tag = "User",
    description = "This API authenticates email/password credentials and issues a JWT.",
    summary = "User Login Request",
    request_body(content = AuthenticateRequest, description = "Request Body"),
    responses(
        (status=200, description= "Authenticated", body= GenericResponse<AuthData>),
        (status=400, description= "Invalid credentials", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "User login", skip(pool, body, secret), fields(email = %body.email))]
pub async fn login(
    body: AuthenticateRequest,
    pool: web::Data<PgPool>,
    secret: web::Data<SecretSetting>,
) -> Result<web::Json<GenericResponse<AuthData>>, GenericError> {
    let user_id = validate_user_credentials(&pool, &body.email, body.password).await?;
    let user = fetch_user_by_id(&pool, user_id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching the user account".to_string(),
                e,
            )
        })?
        .ok_or_else(|| GenericError::DataNotFound("User account not found".to_string()))?;
    let token =
        generate_jwt_token_for_user(user.id, secret.jwt.expiry, &secret.jwt.secret)?;
    Ok(web::Json(GenericResponse::success(
        "Successfully authenticated",
        Some(AuthData {
            token: token.expose_secret().to_string(),
            user,
        }),
    )))
}

#[utoipa::path(
    post,
    path = "/user/address/create",
    tag = "User",
    description = "This API saves a shipping address for the authenticated user.",
    summary = "Address Creation Request",
    request_body(content = CreateAddressRequest, description = "Request Body"),
    responses(
        (status=200, description= "Address created", body= GenericResponse<AddressData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Create address", skip(pool, body), fields(user_id = %user_account.id))]
pub async fn create_address(
    body: CreateAddressRequest,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<AddressData>>, GenericError> {
    let address = save_address(&pool, user_account.id, &body).await.map_err(|e| {
        GenericError::DatabaseError(
            "Something went wrong while saving the address".to_string(),
            e,
        )
    })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully saved address",
        Some(address.into_schema()),
    )))
}

#[utoipa::path(
    get,
    path = "/user/address/list",
    tag = "User",
    description = "This API lists the authenticated user's shipping addresses.",
    summary = "Address List Request",
    responses(
        (status=200, description= "Address list", body= GenericResponse<Vec<AddressData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "List addresses", skip(pool), fields(user_id = %user_account.id))]
pub async fn list_addresses(
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<AddressData>>>, GenericError> {
    let addresses = fetch_addresses_by_user(&pool, user_account.id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching addresses".to_string(),
                e,
            )
        })?
        .into_iter()
        .map(|model| model.into_schema())
        .collect();
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched addresses",
        Some(addresses),
    )))
}

#[utoipa::path(
    patch,
    path = "/user/seller/{seller_id}/verify",
    tag = "User",
    description = "This API marks a seller account as verified. Admin only.",
    summary = "Seller Verification Request",
    params(("seller_id" = String, Path, description = "Seller account id")),
    responses(
        (status=200, description= "Seller verified", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Verify seller", skip(pool), fields(admin_id = %user_account.id))]
pub async fn verify_seller(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let seller_id = path.into_inner();
    let updated = mark_seller_verified(&pool, seller_id).await.map_err(|e| {
        GenericError::DatabaseError(
            "Something went wrong while verifying the seller".to_string(),
            e,
        )
    })?;
    if !updated {
        return Err(GenericError::DataNotFound(
            "No seller account found for the given id".to_string(),
        ));
    }
    Ok(web::Json(GenericResponse::success(
        "Successfully verified seller",
        Some(()),
    )))
}
