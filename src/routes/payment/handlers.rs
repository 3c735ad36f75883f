use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;

use super::schemas::VerifyPaymentRequest;
use super::utils::verify_and_record_payment;
use crate::errors::GenericError;
use crate::payment_client::PaymentClient;
use crate::routes::order::schemas::OrderData;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;

#[utoipa::path(
    post,
    path = "/payment/verify",
    tag = "Payment",
    description = "This API verifies the gateway's payment signature and marks the order paid exactly once.",
    summary = "Payment Verification Request",
    request_body(content = VerifyPaymentRequest, description = "Request Body"),
    responses(
        (status=200, description= "Verified order", body= GenericResponse<OrderData>),
        (status=400, description= "Invalid signature", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(
    name = "Payment verification",
    skip(pool, payment_client, body),
    fields(user_id = %user_account.id, gateway_order_id = %body.gateway_order_id)
)]
pub async fn payment_verify(
    body: VerifyPaymentRequest,
    pool: web::Data<PgPool>,
    payment_client: web::Data<PaymentClient>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<OrderData>>, GenericError> {
    let order = verify_and_record_payment(&pool, &payment_client, user_account.id, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully verified payment",
        Some(order.into_schema()),
    )))
}
