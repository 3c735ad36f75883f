use bigdecimal::BigDecimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::errors::{CreateOrderError, OrderStatusError};
use super::models::{CheckoutLineModel, OrderLineModel, OrderModel};
use super::schemas::{CheckoutData, OrderStatus, PaymentStatus};
use crate::payment_client::PaymentClient;

const ORDER_COLUMNS: &str =
    "id, user_id, address_id, total_amount, status, payment_status, gateway_order_id, created_on";

#[tracing::instrument(name = "Verify address ownership", skip(pool))]
async fn address_belongs_to_user(
    pool: &PgPool,
    address_id: Uuid,
    user_id: Uuid,
) -> Result<bool, anyhow::Error> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM addresses WHERE id = $1 AND user_id = $2")
            .bind(address_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:?}", e);
                anyhow::Error::new(e)
                    .context("A database failure occurred while checking the address")
            })?;
    Ok(row.is_some())
}

/// Loads the cart snapshot inside the checkout transaction with
/// `FOR UPDATE OF p`, which serializes the stock decrement against
/// concurrent checkouts touching the same products.
async fn lock_cart_lines(
    transaction: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<Vec<CheckoutLineModel>, anyhow::Error> {
    sqlx::query_as::<_, CheckoutLineModel>(
        r#"
        SELECT ci.product_id, p.name AS product_name, p.price AS unit_price, ci.quantity
        FROM cart_items ci
        JOIN carts c ON c.id = ci.cart_id
        JOIN products p ON p.id = ci.product_id
        WHERE c.user_id = $1
        ORDER BY ci.created_on
        FOR UPDATE OF p
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut **transaction)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while loading the cart")
    })
}

async fn decrement_stock(
    transaction: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    quantity: i32,
) -> Result<bool, anyhow::Error> {
    let result = sqlx::query("UPDATE products SET stock = stock - $2 WHERE id = $1 AND stock >= $2")
        .bind(product_id)
        .bind(quantity)
        .execute(&mut **transaction)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while reserving stock")
        })?;
    Ok(result.rows_affected() > 0)
}

/// Authoritative server-side total; nothing client-supplied enters it.
pub(crate) fn order_total(lines: &[CheckoutLineModel]) -> BigDecimal {
    lines.iter().fold(BigDecimal::from(0), |acc, line| {
        acc + &line.unit_price * BigDecimal::from(line.quantity)
    })
}

/// Converts the caller's cart into a durable order plus a gateway payment
/// intent, all-or-nothing.
///
/// The gateway call is the commit point: every local write sits inside
/// the transaction, so a gateway failure drops the order, the lines and
/// the stock decrement, and leaves the cart intact for retry. The cart is
/// cleared last, only once the intent exists.
#[tracing::instrument(name = "Create order", skip(pool, payment_client))]
pub async fn create_order(
    pool: &PgPool,
    payment_client: &PaymentClient,
    user_id: Uuid,
    address_id: Uuid,
) -> Result<CheckoutData, CreateOrderError> {
    let owns_address = address_belongs_to_user(pool, address_id, user_id)
        .await
        .map_err(|e| {
            CreateOrderError::DatabaseError(
                "Something went wrong while checking the address".to_string(),
                e,
            )
        })?;
    if !owns_address {
        return Err(CreateOrderError::AddressError(
            "No address found for the given id under your account".to_string(),
        ));
    }

    let mut transaction = pool.begin().await.map_err(|e| {
        CreateOrderError::DatabaseError(
            "Failed to acquire a Postgres connection".to_string(),
            e.into(),
        )
    })?;

    let lines = lock_cart_lines(&mut transaction, user_id).await.map_err(|e| {
        CreateOrderError::DatabaseError(
            "Something went wrong while loading the cart".to_string(),
            e,
        )
    })?;
    if lines.is_empty() {
        return Err(CreateOrderError::EmptyCartError(
            "Cannot create an order from an empty cart".to_string(),
        ));
    }

    for line in &lines {
        let reserved = decrement_stock(&mut transaction, line.product_id, line.quantity)
            .await
            .map_err(|e| {
                CreateOrderError::DatabaseError(
                    "Something went wrong while reserving stock".to_string(),
                    e,
                )
            })?;
        if !reserved {
            return Err(CreateOrderError::InsufficientStockError(format!(
                "Insufficient stock for {}",
                line.product_name
            )));
        }
    }

    let total_amount = order_total(&lines);

    let order_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO orders (id, user_id, address_id, total_amount, status, payment_status)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(order_id)
    .bind(user_id)
    .bind(address_id)
    .bind(&total_amount)
    .bind(OrderStatus::Pending)
    .bind(PaymentStatus::Pending)
    .execute(&mut *transaction)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        CreateOrderError::DatabaseError(
            "Something went wrong while saving the order".to_string(),
            e.into(),
        )
    })?;

    for line in &lines {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(&line.unit_price)
        .execute(&mut *transaction)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            CreateOrderError::DatabaseError(
                "Something went wrong while saving order lines".to_string(),
                e.into(),
            )
        })?;
    }

    // Dropping the transaction on any error below rolls everything back;
    // no order row survives without a gateway intent id.
    let intent = payment_client
        .create_intent(order_id, &total_amount)
        .await
        .map_err(|e| CreateOrderError::GatewayError(e.to_string()))?;

    let order = sqlx::query_as::<_, OrderModel>(&format!(
        "UPDATE orders SET gateway_order_id = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
    ))
    .bind(order_id)
    .bind(&intent.id)
    .fetch_one(&mut *transaction)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        CreateOrderError::DatabaseError(
            "Something went wrong while saving the payment intent id".to_string(),
            e.into(),
        )
    })?;

    sqlx::query(
        "DELETE FROM cart_items WHERE cart_id = (SELECT id FROM carts WHERE user_id = $1)",
    )
    .bind(user_id)
    .execute(&mut *transaction)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        CreateOrderError::DatabaseError(
            "Something went wrong while clearing the cart".to_string(),
            e.into(),
        )
    })?;

    transaction.commit().await.map_err(|e| {
        CreateOrderError::DatabaseError(
            "Failed to commit the checkout transaction".to_string(),
            e.into(),
        )
    })?;

    Ok(CheckoutData {
        order: order.into_schema(),
        gateway_order_id: intent.id,
        amount: intent.amount,
        currency: intent.currency,
        key_id: payment_client.key_id().to_string(),
    })
}

#[tracing::instrument(name = "Fetch orders for user", skip(pool))]
pub async fn fetch_orders_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<OrderModel>, anyhow::Error> {
    sqlx::query_as::<_, OrderModel>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_on DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching orders")
    })
}

#[tracing::instrument(name = "Fetch order by id", skip(pool))]
pub async fn fetch_order_by_id(
    pool: &PgPool,
    order_id: Uuid,
) -> Result<Option<OrderModel>, anyhow::Error> {
    sqlx::query_as::<_, OrderModel>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching the order")
    })
}

#[tracing::instrument(name = "Fetch order lines", skip(pool))]
pub async fn fetch_order_lines(
    pool: &PgPool,
    order_id: Uuid,
) -> Result<Vec<OrderLineModel>, anyhow::Error> {
    sqlx::query_as::<_, OrderLineModel>(
        r#"
        SELECT oi.product_id, p.name AS product_name, oi.quantity, oi.unit_price
        FROM order_items oi
        JOIN products p ON p.id = oi.product_id
        WHERE oi.order_id = $1
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching order lines")
    })
}

/// True when at least one line of the order is a product owned by the
/// given seller.
#[tracing::instrument(name = "Check seller order ownership", skip(pool))]
pub async fn seller_has_line_in_order(
    pool: &PgPool,
    order_id: Uuid,
    seller_id: Uuid,
) -> Result<bool, anyhow::Error> {
    let (exists,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1 AND p.seller_id = $2
        )
        "#,
    )
    .bind(order_id)
    .bind(seller_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while checking order ownership")
    })?;
    Ok(exists)
}

#[tracing::instrument(name = "Update order status", skip(pool))]
pub async fn update_order_status(
    pool: &PgPool,
    order_id: Uuid,
    status: OrderStatus,
) -> Result<Option<OrderModel>, OrderStatusError> {
    sqlx::query_as::<_, OrderModel>(&format!(
        "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
    ))
    .bind(order_id)
    .bind(status)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        OrderStatusError::DatabaseError(
            "Something went wrong while updating the order status".to_string(),
            e.into(),
        )
    })
}
