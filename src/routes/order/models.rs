use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{OrderData, OrderLineData, OrderStatus, PaymentStatus};

#[derive(Debug, FromRow)]
pub struct OrderModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub gateway_order_id: Option<String>,
    pub created_on: DateTime<Utc>,
}

impl OrderModel {
    pub fn into_schema(self) -> OrderData {
        OrderData {
            id: self.id,
            user_id: self.user_id,
            address_id: self.address_id,
            total_amount: self.total_amount,
            status: self.status,
            payment_status: self.payment_status,
            gateway_order_id: self.gateway_order_id,
            created_on: self.created_on,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct OrderLineModel {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl OrderLineModel {
    pub fn into_schema(self) -> OrderLineData {
        OrderLineData {
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Snapshot of one cart line taken inside the checkout transaction.
#[derive(Debug, FromRow)]
pub struct CheckoutLineModel {
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}
