use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{AddressData, UserAccount, UserRole};
use crate::schemas::Status;

#[derive(Debug, FromRow)]
pub struct UserAccountModel {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub mobile_no: String,
    pub role: UserRole,
    pub is_active: Status,
    pub is_deleted: bool,
    pub seller_verified: bool,
}

impl UserAccountModel {
    pub fn into_schema(self) -> UserAccount {
        UserAccount {
            id: self.id,
            username: self.username,
            email: self.email,
            mobile_no: self.mobile_no,
            role: self.role,
            is_active: self.is_active,
            is_deleted: self.is_deleted,
            seller_verified: self.seller_verified,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct AuthCredentialModel {
    pub id: Uuid,
    pub password_hash: String,
}

#[derive(Debug, FromRow)]
pub struct AddressModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub created_on: DateTime<Utc>,
}

impl AddressModel {
    pub fn into_schema(self) -> AddressData {
        AddressData {
            id: self.id,
            address_line: self.address_line,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            country: self.country,
        }
    }
}
