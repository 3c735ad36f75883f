use bigdecimal::BigDecimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::CartLineData;

#[derive(Debug, FromRow)]
pub struct CartLineModel {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl CartLineModel {
    pub fn into_schema(self) -> CartLineData {
        CartLineData {
            id: self.id,
            product_id: self.product_id,
            product_name: self.product_name,
            unit_price: self.unit_price,
            quantity: self.quantity,
        }
    }
}

/// Ownership lookup row for a single cart line.
#[derive(Debug, FromRow)]
pub struct CartLineOwnerModel {
    pub line_id: Uuid,
    pub cart_id: Uuid,
    pub user_id: Uuid,
}
