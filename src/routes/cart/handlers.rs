use actix_web::web;
use bigdecimal::BigDecimal;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

use super::models::CartLineModel;
use super::schemas::{AddCartItemRequest, CartData, UpdateCartItemRequest};
use super::utils::{
    add_cart_item, fetch_cart_lines, get_or_create_cart, remove_cart_item, update_cart_item,
};
use crate::errors::GenericError;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;

pub(crate) fn to_cart_data(cart_id: Uuid, lines: Vec<CartLineModel>) -> CartData {
    let cart_total = lines.iter().fold(BigDecimal::from(0), |acc, line| {
        acc + &line.unit_price * BigDecimal::from(line.quantity)
    });
    CartData {
        cart_id,
        lines: lines.into_iter().map(|l| l.into_schema()).collect(),
        cart_total,
    }
}

#[utoipa::path(
    get,
    path = "/cart/fetch",
    tag = "Cart",
    description = "This API returns the authenticated user's cart, creating it lazily.",
    summary = "Cart Fetch Request",
    responses(
        (status=200, description= "Cart detail", body= GenericResponse<CartData>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Cart fetch", skip(pool), fields(user_id = %user_account.id))]
pub async fn cart_fetch(
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<CartData>>, GenericError> {
    let cart_id = get_or_create_cart(&pool, user_account.id).await.map_err(|e| {
        GenericError::DatabaseError("Something went wrong while fetching the cart".to_string(), e)
    })?;
    let lines = fetch_cart_lines(&pool, cart_id).await.map_err(|e| {
        GenericError::DatabaseError(
            "Something went wrong while fetching cart lines".to_string(),
            e,
        )
    })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched cart",
        Some(to_cart_data(cart_id, lines)),
    )))
}

#[utoipa::path(
    post,
    path = "/cart/add",
    tag = "Cart",
    description = "This API adds a product to the cart; repeated adds accumulate quantity.",
    summary = "Cart Add Request",
    request_body(content = AddCartItemRequest, description = "Request Body"),
    responses(
        (status=200, description= "Updated cart", body= GenericResponse<CartData>),
        (status=400, description= "Invalid Request body / insufficient stock", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Cart add", skip(pool), fields(user_id = %user_account.id))]
pub async fn cart_add(
    body: AddCartItemRequest,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<CartData>>, GenericError> {
    let cart_id = add_cart_item(&pool, user_account.id, body.product_id, body.quantity).await?;
    let lines = fetch_cart_lines(&pool, cart_id).await.map_err(|e| {
        GenericError::DatabaseError(
            "Something went wrong while fetching cart lines".to_string(),
            e,
        )
    })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully added item to cart",
        Some(to_cart_data(cart_id, lines)),
    )))
}

#[utoipa::path(
    patch,
    path = "/cart/update/{line_id}",
    tag = "Cart",
    description = "This API replaces the quantity of a cart line owned by the caller.",
    summary = "Cart Update Request",
    params(("line_id" = String, Path, description = "Cart line id")),
    request_body(content = UpdateCartItemRequest, description = "Request Body"),
    responses(
        (status=200, description= "Line updated", body= GenericResponse<TupleUnit>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Cart update", skip(pool), fields(user_id = %user_account.id))]
pub async fn cart_update(
    path: web::Path<Uuid>,
    body: UpdateCartItemRequest,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    update_cart_item(&pool, user_account.id, path.into_inner(), body.quantity).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully updated cart item",
        Some(()),
    )))
}

#[utoipa::path(
    delete,
    path = "/cart/delete/{line_id}",
    tag = "Cart",
    description = "This API removes a cart line owned by the caller.",
    summary = "Cart Delete Request",
    params(("line_id" = String, Path, description = "Cart line id")),
    responses(
        (status=200, description= "Line removed", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Cart delete", skip(pool), fields(user_id = %user_account.id))]
pub async fn cart_delete(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    remove_cart_item(&pool, user_account.id, path.into_inner()).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully removed cart item",
        Some(()),
    )))
}
