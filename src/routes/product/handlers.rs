use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

use super::schemas::{
    CategoryData, CreateProductRequest, ProductData, ProductListData, ProductListQuery,
    UpdateProductRequest,
};
use super::utils::{
    deactivate_product, fetch_categories, fetch_product_by_id, fetch_product_list,
    fetch_products_by_seller, save_product, update_product,
};
use crate::errors::GenericError;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;

#[utoipa::path(
    get,
    path = "/product/list",
    tag = "Product",
    description = "This API lists active products with pagination, category filter and name search.",
    summary = "Product List Request",
    responses(
        (status=200, description= "Product list", body= GenericResponse<ProductListData>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Product list", skip(pool))]
pub async fn product_list(
    query: web::Query<ProductListQuery>,
    pool: web::Data<PgPool>,
) -> Result<web::Json<GenericResponse<ProductListData>>, GenericError> {
    let (products, total) = fetch_product_list(&pool, &query).await.map_err(|e| {
        GenericError::DatabaseError(
            "Something went wrong while fetching products".to_string(),
            e,
        )
    })?;
    let data = ProductListData {
        products: products.into_iter().map(|p| p.into_schema()).collect(),
        total,
    };
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched products",
        Some(data),
    )))
}

#[utoipa::path(
    get,
    path = "/product/fetch/{id}",
    tag = "Product",
    description = "This API fetches a single product by id.",
    summary = "Product Detail Request",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status=200, description= "Product detail", body= GenericResponse<ProductData>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Product detail", skip(pool))]
pub async fn product_fetch(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<web::Json<GenericResponse<ProductData>>, GenericError> {
    let product = fetch_product_by_id(&pool, path.into_inner())
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching the product".to_string(),
                e,
            )
        })?
        .ok_or_else(|| {
            GenericError::DataNotFound("No product found for the given id".to_string())
        })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched product",
        Some(product.into_schema()),
    )))
}

#[utoipa::path(
    get,
    path = "/product/category/list",
    tag = "Product",
    description = "This API lists product categories.",
    summary = "Category List Request",
    responses(
        (status=200, description= "Category list", body= GenericResponse<Vec<CategoryData>>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Category list", skip(pool))]
pub async fn category_list(
    pool: web::Data<PgPool>,
) -> Result<web::Json<GenericResponse<Vec<CategoryData>>>, GenericError> {
    let categories = fetch_categories(&pool)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching categories".to_string(),
                e,
            )
        })?
        .into_iter()
        .map(|c| c.into_schema())
        .collect();
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched categories",
        Some(categories),
    )))
}

#[utoipa::path(
    post,
    path = "/product/create",
    tag = "Product",
    description = "This API creates a product owned by the authenticated verified seller.",
    summary = "Product Creation Request",
    request_body(content = CreateProductRequest, description = "Request Body"),
    responses(
        (status=200, description= "Product created", body= GenericResponse<ProductData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Product creation", skip(pool, body), fields(seller_id = %user_account.id))]
pub async fn product_create(
    body: CreateProductRequest,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<ProductData>>, GenericError> {
    let product = save_product(&pool, user_account.id, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully created product",
        Some(product.into_schema()),
    )))
}

#[utoipa::path(
    patch,
    path = "/product/update/{id}",
    tag = "Product",
    description = "This API updates a product owned by the authenticated seller.",
    summary = "Product Update Request",
    params(("id" = String, Path, description = "Product id")),
    request_body(content = UpdateProductRequest, description = "Request Body"),
    responses(
        (status=200, description= "Product updated", body= GenericResponse<ProductData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Product update", skip(pool, body), fields(seller_id = %user_account.id))]
pub async fn product_update(
    path: web::Path<Uuid>,
    body: UpdateProductRequest,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<ProductData>>, GenericError> {
    let product = update_product(&pool, user_account.id, path.into_inner(), &body)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while updating the product".to_string(),
                e,
            )
        })?
        .ok_or_else(|| {
            GenericError::DataNotFound(
                "No product found for the given id under your account".to_string(),
            )
        })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully updated product",
        Some(product.into_schema()),
    )))
}

#[utoipa::path(
    delete,
    path = "/product/delete/{id}",
    tag = "Product",
    description = "This API deactivates a product owned by the authenticated seller.",
    summary = "Product Delete Request",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status=200, description= "Product deactivated", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=404, description= "Data not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Product delete", skip(pool), fields(seller_id = %user_account.id))]
pub async fn product_delete(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let removed = deactivate_product(&pool, user_account.id, path.into_inner())
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while deleting the product".to_string(),
                e,
            )
        })?;
    if !removed {
        return Err(GenericError::DataNotFound(
            "No product found for the given id under your account".to_string(),
        ));
    }
    Ok(web::Json(GenericResponse::success(
        "Successfully deleted product",
        Some(()),
    )))
}

#[utoipa::path(
    get,
    path = "/product/seller/list",
    tag = "Product",
    description = "This API lists the authenticated seller's own products, active or not.",
    summary = "Seller Product List Request",
    responses(
        (status=200, description= "Seller product list", body= GenericResponse<Vec<ProductData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "Seller product list", skip(pool), fields(seller_id = %user_account.id))]
pub async fn seller_product_list(
    pool: web::Data<PgPool>,
    user_account: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<ProductData>>>, GenericError> {
    let products = fetch_products_by_seller(&pool, user_account.id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while fetching seller products".to_string(),
                e,
            )
        })?
        .into_iter()
        .map(|p| p.into_schema())
        .collect();
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched seller products",
        Some(products),
    )))
}
