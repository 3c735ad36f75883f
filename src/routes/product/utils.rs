use sqlx::PgPool;
use uuid::Uuid;

use super::errors::ProductError;
use super::models::{CategoryModel, ProductModel};
use super::schemas::{CreateProductRequest, ProductListQuery, UpdateProductRequest};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, stock, is_active, seller_id, category_id, created_on";

/// `%` and `_` in a search term must match literally, not as LIKE
/// wildcards. Backslash is Postgres's default LIKE escape character.
pub(crate) fn escape_like_pattern(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[tracing::instrument(name = "Fetch product list", skip(pool))]
pub async fn fetch_product_list(
    pool: &PgPool,
    query: &ProductListQuery,
) -> Result<(Vec<ProductModel>, i64), anyhow::Error> {
    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);
    let search = query
        .search
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(escape_like_pattern);

    let products = sqlx::query_as::<_, ProductModel>(&format!(
        r#"
        SELECT {PRODUCT_COLUMNS} FROM products
        WHERE is_active = true
          AND ($1::uuid IS NULL OR category_id = $1)
          AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
        ORDER BY created_on DESC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(query.category_id)
    .bind(search.as_deref())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching products")
    })?;

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM products
        WHERE is_active = true
          AND ($1::uuid IS NULL OR category_id = $1)
          AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
        "#,
    )
    .bind(query.category_id)
    .bind(search.as_deref())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while counting products")
    })?;

    Ok((products, total))
}

#[tracing::instrument(name = "Fetch product by id", skip(pool))]
pub async fn fetch_product_by_id(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Option<ProductModel>, anyhow::Error> {
    sqlx::query_as::<_, ProductModel>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(product_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching the product")
    })
}

#[tracing::instrument(name = "Fetch seller products", skip(pool))]
pub async fn fetch_products_by_seller(
    pool: &PgPool,
    seller_id: Uuid,
) -> Result<Vec<ProductModel>, anyhow::Error> {
    sqlx::query_as::<_, ProductModel>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = $1 ORDER BY created_on DESC"
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching seller products")
    })
}

#[tracing::instrument(name = "Save product", skip(pool, product))]
pub async fn save_product(
    pool: &PgPool,
    seller_id: Uuid,
    product: &CreateProductRequest,
) -> Result<ProductModel, ProductError> {
    sqlx::query_as::<_, ProductModel>(&format!(
        r#"
        INSERT INTO products (id, name, description, price, stock, seller_id, category_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PRODUCT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.price)
    .bind(product.stock)
    .bind(seller_id)
    .bind(product.category_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            ProductError::ValidationError("No category found for the given id".to_string())
        }
        _ => {
            tracing::error!("Failed to execute query: {:?}", e);
            ProductError::DatabaseError(
                "A database failure occurred while saving the product".to_string(),
                e.into(),
            )
        }
    })
}

/// Partial update; ownership is enforced in the WHERE clause so a seller
/// can never touch another seller's row.
#[tracing::instrument(name = "Update product", skip(pool, update))]
pub async fn update_product(
    pool: &PgPool,
    seller_id: Uuid,
    product_id: Uuid,
    update: &UpdateProductRequest,
) -> Result<Option<ProductModel>, anyhow::Error> {
    sqlx::query_as::<_, ProductModel>(&format!(
        r#"
        UPDATE products SET
            name = COALESCE($3, name),
            description = COALESCE($4, description),
            price = COALESCE($5, price),
            stock = COALESCE($6, stock),
            is_active = COALESCE($7, is_active)
        WHERE id = $1 AND seller_id = $2
        RETURNING {PRODUCT_COLUMNS}
        "#
    ))
    .bind(product_id)
    .bind(seller_id)
    .bind(&update.name)
    .bind(&update.description)
    .bind(&update.price)
    .bind(update.stock)
    .bind(update.is_active)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while updating the product")
    })
}

/// Deactivates rather than deletes: order lines keep their product
/// reference for history.
#[tracing::instrument(name = "Deactivate product", skip(pool))]
pub async fn deactivate_product(
    pool: &PgPool,
    seller_id: Uuid,
    product_id: Uuid,
) -> Result<bool, anyhow::Error> {
    let result =
        sqlx::query("UPDATE products SET is_active = false WHERE id = $1 AND seller_id = $2")
            .bind(product_id)
            .bind(seller_id)
            .execute(pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:?}", e);
                anyhow::Error::new(e)
                    .context("A database failure occurred while deactivating the product")
            })?;
    Ok(result.rows_affected() > 0)
}

#[tracing::instrument(name = "Fetch categories", skip(pool))]
pub async fn fetch_categories(pool: &PgPool) -> Result<Vec<CategoryModel>, anyhow::Error> {
    sqlx::query_as::<_, CategoryModel>("SELECT id, name FROM categories ORDER BY name")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while fetching categories")
        })
}
