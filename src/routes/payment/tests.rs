#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::payment_client::{sign_payment_payload, PaymentClient};
    use crate::routes::order::schemas::{OrderStatus, PaymentStatus};
    use crate::routes::payment::errors::PaymentVerificationError;
    use crate::routes::payment::schemas::VerifyPaymentRequest;
    use crate::routes::payment::utils::verify_and_record_payment;
    use crate::routes::user::schemas::UserRole;
    use crate::tests::tests::{get_test_pool, seed_address, seed_user};

    const KEY_SECRET: &str = "rzp_test_secret";

    fn gateway_client() -> PaymentClient {
        PaymentClient::new(
            "http://127.0.0.1:1".to_string(),
            "rzp_test_key".to_string(),
            SecretString::from(KEY_SECRET),
            "INR".to_string(),
            std::time::Duration::from_millis(500),
        )
        .unwrap()
    }

    async fn seed_pending_order(pool: &PgPool, user_id: Uuid) -> (Uuid, String) {
        let address_id = seed_address(pool, user_id).await;
        let order_id = Uuid::new_v4();
        let gateway_order_id = format!("order_test_{}", order_id);
        sqlx::query(
            r#"
            INSERT INTO orders
                (id, user_id, address_id, total_amount, status, payment_status, gateway_order_id)
            VALUES ($1, $2, $3, 25.50, 'pending', 'pending', $4)
            "#,
        )
        .bind(order_id)
        .bind(user_id)
        .bind(address_id)
        .bind(&gateway_order_id)
        .execute(pool)
        .await
        .unwrap();
        (order_id, gateway_order_id)
    }

    async fn count_payments(pool: &PgPool, order_id: Uuid) -> i64 {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM payments WHERE order_id = $1")
                .bind(order_id)
                .fetch_one(pool)
                .await
                .unwrap();
        count
    }

    #[tokio::test]
    async fn test_repeated_verification_records_one_payment() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let (order_id, gateway_order_id) = seed_pending_order(&pool, buyer_id).await;
        let gateway_payment_id = format!("pay_test_{}", order_id);
        let body = VerifyPaymentRequest {
            signature: sign_payment_payload(&gateway_order_id, &gateway_payment_id, KEY_SECRET),
            gateway_order_id,
            gateway_payment_id,
            method: Some("upi".to_string()),
        };

        let client = gateway_client();
        let first = verify_and_record_payment(&pool, &client, buyer_id, &body)
            .await
            .unwrap();
        assert_eq!(first.payment_status, PaymentStatus::Paid);
        assert_eq!(first.status, OrderStatus::Processing);

        let second = verify_and_record_payment(&pool, &client, buyer_id, &body)
            .await
            .unwrap();
        assert_eq!(second.payment_status, PaymentStatus::Paid);
        assert_eq!(count_payments(&pool, order_id).await, 1);
    }

    #[tokio::test]
    async fn test_tampered_signature_mutates_nothing() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let (order_id, gateway_order_id) = seed_pending_order(&pool, buyer_id).await;
        let gateway_payment_id = format!("pay_test_{}", order_id);
        let body = VerifyPaymentRequest {
            signature: sign_payment_payload(&gateway_order_id, &gateway_payment_id, "wrong-key"),
            gateway_order_id,
            gateway_payment_id,
            method: None,
        };

        let result = verify_and_record_payment(&pool, &gateway_client(), buyer_id, &body).await;
        assert!(matches!(
            result,
            Err(PaymentVerificationError::SignatureError(_))
        ));

        let (payment_status,): (PaymentStatus,) =
            sqlx::query_as("SELECT payment_status FROM orders WHERE id = $1")
                .bind(order_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(payment_status, PaymentStatus::Pending);
        assert_eq!(count_payments(&pool, order_id).await, 0);
    }

    #[tokio::test]
    async fn test_verification_rejects_another_users_order() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let intruder_id = seed_user(&pool, UserRole::User).await;
        let (order_id, gateway_order_id) = seed_pending_order(&pool, buyer_id).await;
        let gateway_payment_id = format!("pay_test_{}", order_id);
        let body = VerifyPaymentRequest {
            signature: sign_payment_payload(&gateway_order_id, &gateway_payment_id, KEY_SECRET),
            gateway_order_id,
            gateway_payment_id,
            method: None,
        };

        let result =
            verify_and_record_payment(&pool, &gateway_client(), intruder_id, &body).await;
        assert!(matches!(
            result,
            Err(PaymentVerificationError::OwnershipError(_))
        ));
        assert_eq!(count_payments(&pool, order_id).await, 0);
    }
}
