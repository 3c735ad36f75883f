#[cfg(test)]
pub mod tests {
    use crate::configuration::get_configuration;
    use crate::routes::user::schemas::{UserAccount, UserRole};
    use crate::schemas::Status;
    use crate::startup::get_connection_pool;
    use sqlx::PgPool;
    use uuid::Uuid;

    pub async fn get_test_pool() -> PgPool {
        let mut configuration = get_configuration().expect("Failed to read configuration.");
        configuration.application.port = 0;
        get_connection_pool(&configuration.database)
    }

    pub fn get_dummy_user_account(
        username: String,
        mobile_no: String,
        email: String,
        role: UserRole,
    ) -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            username,
            email,
            mobile_no,
            role,
            is_active: Status::Active,
            is_deleted: false,
            seller_verified: false,
        }
    }

    pub async fn seed_user(pool: &PgPool, role: UserRole) -> Uuid {
        let user_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, mobile_no, password_hash, role)
            VALUES ($1, $2, $3, $4, 'not-a-real-hash', $5)
            "#,
        )
        .bind(user_id)
        .bind(format!("user-{}", user_id))
        .bind(format!("{}@test.example", user_id))
        .bind("9876543210")
        .bind(role)
        .execute(pool)
        .await
        .expect("Failed to seed user");
        user_id
    }

    pub async fn seed_address(pool: &PgPool, user_id: Uuid) -> Uuid {
        let address_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO addresses (id, user_id, address_line, city, state, pincode, country)
            VALUES ($1, $2, '12 Harbour Lane', 'Kochi', 'Kerala', '682001', 'IN')
            "#,
        )
        .bind(address_id)
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to seed address");
        address_id
    }

    pub async fn seed_product(
        pool: &PgPool,
        seller_id: Uuid,
        price: &str,
        stock: i32,
    ) -> Uuid {
        let category_id = Uuid::new_v4();
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(category_id)
            .bind(format!("category-{}", category_id))
            .execute(pool)
            .await
            .expect("Failed to seed category");
        let product_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock, seller_id, category_id)
            VALUES ($1, $2, NULL, $3::numeric, $4, $5, $6)
            "#,
        )
        .bind(product_id)
        .bind(format!("product-{}", product_id))
        .bind(price)
        .bind(stock)
        .bind(seller_id)
        .bind(category_id)
        .execute(pool)
        .await
        .expect("Failed to seed product");
        product_id
    }
}
