use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{CategoryData, ProductData};

#[derive(Debug, FromRow)]
pub struct ProductModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock: i32,
    pub is_active: bool,
    pub seller_id: Uuid,
    pub category_id: Uuid,
    pub created_on: DateTime<Utc>,
}

impl ProductModel {
    pub fn into_schema(self) -> ProductData {
        ProductData {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            is_active: self.is_active,
            seller_id: self.seller_id,
            category_id: self.category_id,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CategoryModel {
    pub id: Uuid,
    pub name: String,
}

impl CategoryModel {
    pub fn into_schema(self) -> CategoryData {
        CategoryData {
            id: self.id,
            name: self.name,
        }
    }
}
