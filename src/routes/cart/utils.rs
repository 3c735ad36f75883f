use sqlx::PgPool;
use uuid::Uuid;

use super::errors::CartError;
use super::models::{CartLineModel, CartLineOwnerModel};
use crate::routes::product::utils::fetch_product_by_id;

#[tracing::instrument(name = "Get or create cart", skip(pool))]
pub async fn get_or_create_cart(pool: &PgPool, user_id: Uuid) -> Result<Uuid, anyhow::Error> {
    // The no-op update makes the upsert return the existing row's id.
    let (cart_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO carts (id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while creating the cart")
    })?;
    Ok(cart_id)
}

#[tracing::instrument(name = "Fetch cart lines", skip(pool))]
pub async fn fetch_cart_lines(
    pool: &PgPool,
    cart_id: Uuid,
) -> Result<Vec<CartLineModel>, anyhow::Error> {
    sqlx::query_as::<_, CartLineModel>(
        r#"
        SELECT ci.id, ci.cart_id, ci.product_id, p.name AS product_name,
               p.price AS unit_price, ci.quantity
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.cart_id = $1
        ORDER BY ci.created_on
        "#,
    )
    .bind(cart_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching cart lines")
    })
}

/// Adds a product to the user's cart, creating the cart lazily.
///
/// Repeated adds for the same product accumulate through an atomic
/// increment at the storage layer, so two concurrent adds never lose an
/// update. The stock gate checks the requested quantity against the
/// product's stock at call time.
#[tracing::instrument(name = "Add cart item", skip(pool))]
pub async fn add_cart_item(
    pool: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> Result<Uuid, CartError> {
    let product = fetch_product_by_id(pool, product_id)
        .await
        .map_err(|e| {
            CartError::DatabaseError(
                "Something went wrong while fetching the product".to_string(),
                e,
            )
        })?
        .ok_or_else(|| {
            CartError::NotFoundError("No product found for the given id".to_string())
        })?;
    if !product.is_active {
        return Err(CartError::ValidationError(
            "Product is no longer available".to_string(),
        ));
    }
    if product.stock < quantity {
        return Err(CartError::InsufficientStockError(format!(
            "Insufficient stock for {}: {} requested, {} available",
            product.name, quantity, product.stock
        )));
    }

    let cart_id = get_or_create_cart(pool, user_id).await.map_err(|e| {
        CartError::DatabaseError(
            "Something went wrong while creating the cart".to_string(),
            e,
        )
    })?;

    sqlx::query(
        r#"
        INSERT INTO cart_items (id, cart_id, product_id, quantity)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (cart_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(cart_id)
    .bind(product_id)
    .bind(quantity)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        CartError::DatabaseError(
            "Something went wrong while adding the cart item".to_string(),
            e.into(),
        )
    })?;
    Ok(cart_id)
}

#[tracing::instrument(name = "Fetch cart line owner", skip(pool))]
async fn fetch_cart_line_owner(
    pool: &PgPool,
    line_id: Uuid,
) -> Result<Option<CartLineOwnerModel>, CartError> {
    sqlx::query_as::<_, CartLineOwnerModel>(
        r#"
        SELECT ci.id AS line_id, ci.cart_id, c.user_id
        FROM cart_items ci
        JOIN carts c ON c.id = ci.cart_id
        WHERE ci.id = $1
        "#,
    )
    .bind(line_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        CartError::DatabaseError(
            "Something went wrong while fetching the cart line".to_string(),
            e.into(),
        )
    })
}

#[tracing::instrument(name = "Update cart item", skip(pool))]
pub async fn update_cart_item(
    pool: &PgPool,
    user_id: Uuid,
    line_id: Uuid,
    quantity: i32,
) -> Result<(), CartError> {
    let owner = fetch_cart_line_owner(pool, line_id).await?.ok_or_else(|| {
        CartError::NotFoundError("No cart line found for the given id".to_string())
    })?;
    if owner.user_id != user_id {
        return Err(CartError::OwnershipError(
            "This cart line belongs to another user".to_string(),
        ));
    }
    sqlx::query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
        .bind(line_id)
        .bind(quantity)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            CartError::DatabaseError(
                "Something went wrong while updating the cart item".to_string(),
                e.into(),
            )
        })?;
    Ok(())
}

#[tracing::instrument(name = "Remove cart item", skip(pool))]
pub async fn remove_cart_item(
    pool: &PgPool,
    user_id: Uuid,
    line_id: Uuid,
) -> Result<(), CartError> {
    let owner = fetch_cart_line_owner(pool, line_id).await?.ok_or_else(|| {
        CartError::NotFoundError("No cart line found for the given id".to_string())
    })?;
    if owner.user_id != user_id {
        return Err(CartError::OwnershipError(
            "This cart line belongs to another user".to_string(),
        ));
    }
    sqlx::query("DELETE FROM cart_items WHERE id = $1")
        .bind(line_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            CartError::DatabaseError(
                "Something went wrong while removing the cart item".to_string(),
                e.into(),
            )
        })?;
    Ok(())
}
