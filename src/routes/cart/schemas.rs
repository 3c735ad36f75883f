use actix_http::Payload;
use actix_web::web::Json;
use actix_web::{FromRequest, HttpRequest};
use bigdecimal::BigDecimal;
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::GenericError;

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    #[schema(value_type = String)]
    pub product_id: Uuid,
    pub quantity: i32,
}

impl FromRequest for AddCartItemRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => {
                    let body = json.into_inner();
                    if body.quantity < 1 {
                        return Err(GenericError::ValidationError(
                            "Quantity must be at least 1".to_string(),
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
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

impl FromRequest for UpdateCartItemRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => {
                    let body = json.into_inner();
                    if body.quantity < 1 {
                        return Err(GenericError::ValidationError(
                            "Quantity must be at least 1".to_string(),
                        ));
                    }
                    Ok(body)
                }
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineData {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub product_id: Uuid,
    pub product_name: String,
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartData {
    #[schema(value_type = String)]
    pub cart_id: Uuid,
    pub lines: Vec<CartLineData>,
    #[schema(value_type = String)]
    pub cart_total: BigDecimal,
}
