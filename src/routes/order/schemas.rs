use actix_http::Payload;
use actix_web::web::Json;
use actix_web::{FromRequest, HttpRequest};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::GenericError;

/// Order lifecycle. Transitions are persisted verbatim; there is no
/// state machine beyond the closed enum.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[schema(value_type = String)]
    pub address_id: Uuid,
}

impl FromRequest for CreateOrderRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => Ok(json.into_inner()),
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

impl FromRequest for UpdateOrderStatusRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(json) => Ok(json.into_inner()),
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub user_id: Uuid,
    #[schema(value_type = String)]
    pub address_id: Uuid,
    #[schema(value_type = String)]
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub gateway_order_id: Option<String>,
    #[schema(value_type = String)]
    pub created_on: DateTime<Utc>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineData {
    #[schema(value_type = String)]
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    /// Price captured at purchase time; later product price changes do
    /// not alter historical orders.
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailData {
    pub order: OrderData,
    pub lines: Vec<OrderLineData>,
}

/// Everything the client needs to open the gateway's hosted checkout.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub order: OrderData,
    pub gateway_order_id: String,
    /// Amount in the gateway's minor currency unit.
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}
