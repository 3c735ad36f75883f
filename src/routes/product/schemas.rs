use actix_http::Payload;
use actix_web::web::Json;
use actix_web::{FromRequest, HttpRequest};
use bigdecimal::BigDecimal;
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::errors::GenericError;

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub stock: i32,
    pub is_active: bool,
    #[schema(value_type = String)]
    pub seller_id: Uuid,
    #[schema(value_type = String)]
    pub category_id: Uuid,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListData {
    pub products: Vec<ProductData>,
    pub total: i64,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[schema(value_type = String)]
    pub category_id: Uuid,
}

impl FromRequest for CreateProductRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => {
                    let body = json.into_inner();
                    body.validate()
                        .map_err(|e| GenericError::ValidationError(e.to_string()))?;
                    if body.price <= BigDecimal::from(0) {
                        return Err(GenericError::ValidationError(
                            "Product price must be positive".to_string(),
                        ));
                    }
                    Ok(body)
                }
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
}

impl FromRequest for UpdateProductRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => {
                    let body = json.into_inner();
                    if let Some(price) = &body.price {
                        if *price <= BigDecimal::from(0) {
                            return Err(GenericError::ValidationError(
                                "Product price must be positive".to_string(),
                            ));
                        }
                    }
                    if matches!(body.stock, Some(stock) if stock < 0) {
                        return Err(GenericError::ValidationError(
                            "Product stock cannot be negative".to_string(),
                        ));
                    }
                    Ok(body)
                }
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}
