#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use crate::routes::cart::errors::CartError;
    use crate::routes::cart::handlers::to_cart_data;
    use crate::routes::cart::models::CartLineModel;
    use crate::routes::cart::utils::{
        add_cart_item, fetch_cart_lines, get_or_create_cart, remove_cart_item, update_cart_item,
    };
    use crate::routes::user::schemas::UserRole;
    use crate::tests::tests::{get_test_pool, seed_product, seed_user};

    fn line(unit_price: &str, quantity: i32) -> CartLineModel {
        CartLineModel {
            id: Uuid::new_v4(),
            cart_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_name: "Steel Tumbler".to_string(),
            unit_price: BigDecimal::from_str(unit_price).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_cart_total_folds_line_amounts() {
        let cart_id = Uuid::new_v4();
        let data = to_cart_data(cart_id, vec![line("199.50", 2), line("49.00", 3)]);
        assert_eq!(data.cart_id, cart_id);
        assert_eq!(data.lines.len(), 2);
        assert_eq!(data.cart_total, BigDecimal::from_str("546.00").unwrap());
    }

    #[test]
    fn test_empty_cart_totals_to_zero() {
        let data = to_cart_data(Uuid::new_v4(), vec![]);
        assert!(data.lines.is_empty());
        assert_eq!(data.cart_total, BigDecimal::from(0));
    }

    #[tokio::test]
    async fn test_repeated_adds_accumulate_into_one_line() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let seller_id = seed_user(&pool, UserRole::Seller).await;
        let product_id = seed_product(&pool, seller_id, "49.00", 10).await;

        let cart_id = add_cart_item(&pool, buyer_id, product_id, 2).await.unwrap();
        add_cart_item(&pool, buyer_id, product_id, 3).await.unwrap();

        let lines = fetch_cart_lines(&pool, cart_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_add_beyond_stock_leaves_cart_unchanged() {
        let pool = get_test_pool().await;
        let buyer_id = seed_user(&pool, UserRole::User).await;
        let seller_id = seed_user(&pool, UserRole::Seller).await;
        let product_id = seed_product(&pool, seller_id, "49.00", 1).await;

        let result = add_cart_item(&pool, buyer_id, product_id, 2).await;
        assert!(matches!(result, Err(CartError::InsufficientStockError(_))));

        let cart_id = get_or_create_cart(&pool, buyer_id).await.unwrap();
        let lines = fetch_cart_lines(&pool, cart_id).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_cart_line_mutation_requires_ownership() {
        let pool = get_test_pool().await;
        let owner_id = seed_user(&pool, UserRole::User).await;
        let intruder_id = seed_user(&pool, UserRole::User).await;
        let seller_id = seed_user(&pool, UserRole::Seller).await;
        let product_id = seed_product(&pool, seller_id, "49.00", 10).await;

        let cart_id = add_cart_item(&pool, owner_id, product_id, 2).await.unwrap();
        let line_id = fetch_cart_lines(&pool, cart_id).await.unwrap()[0].id;

        let update = update_cart_item(&pool, intruder_id, line_id, 9).await;
        assert!(matches!(update, Err(CartError::OwnershipError(_))));
        let removal = remove_cart_item(&pool, intruder_id, line_id).await;
        assert!(matches!(removal, Err(CartError::OwnershipError(_))));

        let lines = fetch_cart_lines(&pool, cart_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }
}
