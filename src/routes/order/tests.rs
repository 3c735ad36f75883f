#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use secrecy::SecretString;
    use serde_json::json;
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::payment_client::PaymentClient;
    use crate::routes::cart::utils::{add_cart_item, fetch_cart_lines};
    use crate::routes::order::errors::CreateOrderError;
    use crate::routes::order::models::CheckoutLineModel;
    use crate::routes::order::schemas::{OrderStatus, PaymentStatus, UpdateOrderStatusRequest};
    use crate::routes::order::utils::{create_order, order_total, seller_has_line_in_order};
    use crate::routes::user::schemas::UserRole;
    use crate::tests::tests::{get_test_pool, seed_address, seed_product, seed_user};

    fn unreachable_gateway() -> PaymentClient {
        PaymentClient::new(
            "http://127.0.0.1:1".to_string(),
            "rzp_test_key".to_string(),
            SecretString::from("rzp_test_secret"),
            "INR".to_string(),
            std::time::Duration::from_millis(500),
        )
        .unwrap()
    }

    async fn count_orders(pool: &PgPool, user_id: Uuid) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    fn checkout_line(unit_price: &str, quantity: i32) -> CheckoutLineModel {
        CheckoutLineModel {
            product_id: Uuid::new_v4(),
            product_name: "Ceramic Mug".to_string(),
            unit_price: BigDecimal::from_str(unit_price).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_order_total_is_computed_server_side() {
        let lines = vec![checkout_line("10.00", 2), checkout_line("5.50", 1)];
        assert_eq!(order_total(&lines), BigDecimal::from_str("25.50").unwrap());
        assert_eq!(order_total(&[]), BigDecimal::from(0));
    }

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(
            serde_json::to_value(OrderStatus::Processing).unwrap(),
            json!("processing")
        );
        assert_eq!(
            serde_json::from_value::<OrderStatus>(json!("shipped")).unwrap(),
            OrderStatus::Shipped
        );
        assert!(serde_json::from_value::<OrderStatus>(json!("returned")).is_err());
    }

    #[test]
    fn test_payment_status_wire_format() {
        assert_eq!(
            serde_json::to_value(PaymentStatus::Paid).unwrap(),
            json!("paid")
        );
        assert!(serde_json::from_value::<PaymentStatus>(json!("refunded")).is_err());
    }

    #[tokio::test]
    async fn test_gateway_failure_rolls_back_the_checkout() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let seller_id = seed_user(&pool, UserRole::Seller).await;
        let product_id = seed_product(&pool, seller_id, "10.00", 5).await;
        let address_id = seed_address(&pool, buyer_id).await;
        let cart_id = add_cart_item(&pool, buyer_id, product_id, 2).await.unwrap();

        let result = create_order(&pool, &unreachable_gateway(), buyer_id, address_id).await;
        assert!(matches!(result, Err(CreateOrderError::GatewayError(_))));

        assert_eq!(count_orders(&pool, buyer_id).await, 0);
        let lines = fetch_cart_lines(&pool, cart_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        let (stock,): (i32,) = sqlx::query_as("SELECT stock FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stock, 5);
    }

    #[tokio::test]
    async fn test_checkout_requires_an_owned_address() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let other_id = seed_user(&pool, UserRole::User).await;
        let seller_id = seed_user(&pool, UserRole::Seller).await;
        let product_id = seed_product(&pool, seller_id, "10.00", 5).await;
        let foreign_address_id = seed_address(&pool, other_id).await;
        add_cart_item(&pool, buyer_id, product_id, 1).await.unwrap();

        let result =
            create_order(&pool, &unreachable_gateway(), buyer_id, foreign_address_id).await;
        assert!(matches!(result, Err(CreateOrderError::AddressError(_))));
        assert_eq!(count_orders(&pool, buyer_id).await, 0);
    }

    #[tokio::test]
    async fn test_seller_line_membership_gates_status_updates() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let seller_id = seed_user(&pool, UserRole::Seller).await;
        let bystander_id = seed_user(&pool, UserRole::Seller).await;
        let product_id = seed_product(&pool, seller_id, "10.00", 5).await;
        let address_id = seed_address(&pool, buyer_id).await;

        let order_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, address_id, total_amount, status, payment_status)
            VALUES ($1, $2, $3, 10.00, 'pending', 'pending')
            "#,
        )
        .bind(order_id)
        .bind(buyer_id)
        .bind(address_id)
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, 1, 10.00)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(product_id)
        .execute(&pool)
        .await
        .unwrap();

        assert!(seller_has_line_in_order(&pool, order_id, seller_id)
            .await
            .unwrap());
        assert!(!seller_has_line_in_order(&pool, order_id, bystander_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_user_deletion_cascades_through_orders_and_payments() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let address_id = seed_address(&pool, buyer_id).await;

        let order_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, address_id, total_amount, status, payment_status)
            VALUES ($1, $2, $3, 10.00, 'pending', 'paid')
            "#,
        )
        .bind(order_id)
        .bind(buyer_id)
        .bind(address_id)
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            r#"
            INSERT INTO payments
                (id, order_id, gateway_payment_id, gateway_order_id, amount, currency, captured)
            VALUES ($1, $2, $3, $4, 10.00, 'INR', true)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(format!("pay_{}", order_id))
        .bind(format!("order_{}", order_id))
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(buyer_id)
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(count_orders(&pool, buyer_id).await, 0);
        let (payments,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM payments WHERE order_id = $1")
                .bind(order_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(payments, 0);
    }

    #[test]
    fn test_status_update_body_rejects_unknown_status() {
        let body: Result<UpdateOrderStatusRequest, _> =
            serde_json::from_value(json!({"status": "archived"}));
        assert!(body.is_err());
        let body: UpdateOrderStatusRequest =
            serde_json::from_value(json!({"status": "delivered"})).unwrap();
        assert_eq!(body.status, OrderStatus::Delivered);
    }
}
