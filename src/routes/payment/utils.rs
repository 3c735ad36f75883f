use sqlx::PgPool;
use uuid::Uuid;

use super::errors::PaymentVerificationError;
use super::schemas::VerifyPaymentRequest;
use crate::payment_client::PaymentClient;
use crate::routes::order::models::OrderModel;
use crate::routes::order::schemas::{OrderStatus, PaymentStatus};

const ORDER_COLUMNS: &str =
    "id, user_id, address_id, total_amount, status, payment_status, gateway_order_id, created_on";

#[tracing::instrument(name = "Fetch order by gateway order id", skip(pool))]
async fn fetch_order_by_gateway_order_id(
    pool: &PgPool,
    gateway_order_id: &str,
) -> Result<Option<OrderModel>, anyhow::Error> {
    sqlx::query_as::<_, OrderModel>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE gateway_order_id = $1"
    ))
    .bind(gateway_order_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching the order")
    })
}

/// Authenticates the gateway callback and marks the order paid exactly
/// once.
///
/// Idempotent on two levels: an order already marked paid short-circuits
/// without touching the payments table, and the unique key on
/// `gateway_payment_id` absorbs duplicate callback delivery. The status
/// flip and the payment insert share one transaction so a crash cannot
/// separate them.
#[tracing::instrument(name = "Verify payment", skip(pool, payment_client, body))]
pub async fn verify_and_record_payment(
    pool: &PgPool,
    payment_client: &PaymentClient,
    user_id: Uuid,
    body: &VerifyPaymentRequest,
) -> Result<OrderModel, PaymentVerificationError> {
    payment_client
        .verify_signature(
            &body.gateway_order_id,
            &body.gateway_payment_id,
            &body.signature,
        )
        .map_err(|_| {
            PaymentVerificationError::SignatureError(
                "Payment signature verification failed".to_string(),
            )
        })?;

    let order = fetch_order_by_gateway_order_id(pool, &body.gateway_order_id)
        .await
        .map_err(|e| {
            PaymentVerificationError::DatabaseError(
                "Something went wrong while fetching the order".to_string(),
                e,
            )
        })?
        .ok_or_else(|| {
            PaymentVerificationError::NotFoundError(
                "No order found for the given gateway order id".to_string(),
            )
        })?;
    if order.user_id != user_id {
        return Err(PaymentVerificationError::OwnershipError(
            "This order belongs to another user".to_string(),
        ));
    }
    if order.payment_status == PaymentStatus::Paid {
        return Ok(order);
    }

    let mut transaction = pool.begin().await.map_err(|e| {
        PaymentVerificationError::DatabaseError(
            "Failed to acquire a Postgres connection".to_string(),
            e.into(),
        )
    })?;

    let order = sqlx::query_as::<_, OrderModel>(&format!(
        "UPDATE orders SET payment_status = $2, status = $3 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
    ))
    .bind(order.id)
    .bind(PaymentStatus::Paid)
    .bind(OrderStatus::Processing)
    .fetch_one(&mut *transaction)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        PaymentVerificationError::DatabaseError(
            "Something went wrong while updating the order".to_string(),
            e.into(),
        )
    })?;

    sqlx::query(
        r#"
        INSERT INTO payments
            (id, order_id, gateway_payment_id, gateway_order_id, amount, currency, method, captured)
        VALUES ($1, $2, $3, $4, $5, $6, $7, true)
        ON CONFLICT (gateway_payment_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(order.id)
    .bind(&body.gateway_payment_id)
    .bind(&body.gateway_order_id)
    .bind(&order.total_amount)
    .bind(payment_client.currency())
    .bind(body.method.as_deref().unwrap_or("unknown"))
    .execute(&mut *transaction)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        PaymentVerificationError::DatabaseError(
            "Something went wrong while recording the payment".to_string(),
            e.into(),
        )
    })?;

    transaction.commit().await.map_err(|e| {
        PaymentVerificationError::DatabaseError(
            "Failed to commit the payment transaction".to_string(),
            e.into(),
        )
    })?;
    Ok(order)
}
