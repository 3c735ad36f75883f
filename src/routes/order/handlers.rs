use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

use super::errors::OrderStatusError;
use super::schemas::{
    CheckoutData, CreateOrderRequest, OrderData, OrderDetailData, UpdateOrderStatusRequest,
};
use super::utils::{
    create_order, fetch_order_by_id, fetch_order_lines, fetch_orders_by_user,
    seller_has_line_in_order, update_order_status,
};
use crate::errors::GenericError;
use crate::payment_client::PaymentClient;
use crate::routes::user::schemas::{UserAccount, UserRole};
use crate::schemas::GenericResponse;

#[utoipa::path(
    post,
    path = "/order/create",
    tag = "Order",
    description = "This API converts the caller's cart into an order and a gateway payment intent.",
    summary = "Order Creation Request",
    request_body(content = CreateOrderRequest, description = "Request Body"),
    responses(
        (status=200, description= "Checkout context", body= GenericResponse<CheckoutData>),
        (status=400, description= "Empty cart / bad address / insufficient stock", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Gateway failure / Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Order creation", skip(pool, payment_client), fields(user_id = %user_account.id))]
pub async fn order_create(
    body: CreateOrderRequest,
    pool: web::Data<PgPool>,
    payment_client: web::Data<PaymentClient>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<CheckoutData>>, GenericError> {
    let checkout = create_order(&pool, &payment_client, user_account.id, body.address_id).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully created order",
        Some(checkout),
    )))
}

#[utoipa::path(
    get,
    path = "/order/list",
    tag = "Order",
    description = "This API lists the caller's orders, newest first.",
    summary = "Order List Request",
    responses(
        (status=200, description= "Order list", body= GenericResponse<Vec<OrderData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Order list", skip(pool), fields(user_id = %user_account.id))]
pub async fn order_list(
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<OrderData>>>, GenericError> {
    let orders = fetch_orders_by_user(&pool, user_account.id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching orders".to_string(),
                e,
            )
        })?
        .into_iter()
        .map(|o| o.into_schema())
        .collect();
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched orders",
        Some(orders),
    )))
}

#[utoipa::path(
    get,
    path = "/order/fetch/{id}",
    tag = "Order",
    description = "This API fetches an order with its lines. Visible to the owner, admins, and sellers with a line in it.",
    summary = "Order Detail Request",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status=200, description= "Order detail", body= GenericResponse<OrderDetailData>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Order detail", skip(pool), fields(user_id = %user_account.id))]
pub async fn order_fetch(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<OrderDetailData>>, GenericError> {
    let order_id = path.into_inner();
    let order = fetch_order_by_id(&pool, order_id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching the order".to_string(),
                e,
            )
        })?
        .ok_or_else(|| {
            GenericError::DataNotFound("No order found for the given id".to_string())
        })?;

    let allowed = match user_account.role {
        UserRole::Admin | UserRole::SuperAdmin => true,
        UserRole::User => order.user_id == user_account.id,
        UserRole::Seller => {
            order.user_id == user_account.id
                || seller_has_line_in_order(&pool, order_id, user_account.id)
                    .await
                    .map_err(GenericError::UnexpectedError)?
        }
    };
    if !allowed {
        return Err(GenericError::InsufficientPrivilegeError(
            "You do not have access to this order".to_string(),
        ));
    }

    let lines = fetch_order_lines(&pool, order_id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching order lines".to_string(),
                e,
            )
        })?
        .into_iter()
        .map(|l| l.into_schema())
        .collect();
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched order",
        Some(OrderDetailData {
            order: order.into_schema(),
            lines,
        }),
    )))
}

#[utoipa::path(
    patch,
    path = "/order/status/{id}",
    tag = "Order",
    description = "This API updates an order's lifecycle status. Admins may update any order; a seller only orders containing their products.",
    summary = "Order Status Update Request",
    params(("id" = String, Path, description = "Order id")),
    request_body(content = UpdateOrderStatusRequest, description = "Request Body"),
    responses(
        (status=200, description= "Updated order", body= GenericResponse<OrderData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Order status update", skip(pool), fields(caller_id = %user_account.id))]
pub async fn order_status_update(
    path: web::Path<Uuid>,
    body: UpdateOrderStatusRequest,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<OrderData>>, GenericError> {
    let order_id = path.into_inner();
    if user_account.role == UserRole::Seller {
        let owns_line = seller_has_line_in_order(&pool, order_id, user_account.id)
            .await
            .map_err(GenericError::UnexpectedError)?;
        if !owns_line {
            return Err(OrderStatusError::OwnershipError(
                "None of your products appear in this order".to_string(),
            ))?;
        }
    }
    let order = update_order_status(&pool, order_id, body.status)
        .await?
        .ok_or_else(|| {
            GenericError::DataNotFound("No order found for the given id".to_string())
        })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully updated order status",
        Some(order.into_schema()),
    )))
}
