#[cfg(test)]
mod tests {
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use secrecy::SecretString;
    use serde_json::json;
    use validator::Validate;

    use actix_web::dev::Payload;
    use actix_web::{FromRequest, HttpMessage};

    use crate::routes::user::schemas::{CreateUserAccount, UserAccount, UserRole};
    use crate::tests::tests::get_dummy_user_account;

    fn valid_account() -> CreateUserAccount {
        CreateUserAccount {
            username: "marketside".to_string(),
            email: SafeEmail().fake(),
            mobile_no: "9876543210".to_string(),
            password: SecretString::from("hunter2hunter2"),
            register_as_seller: true,
        }
    }

    #[test]
    fn test_account_validation() {
        assert!(valid_account().validate().is_ok());

        let mut account = valid_account();
        account.username = "ab".to_string();
        assert!(account.validate().is_err());

        let mut account = valid_account();
        account.email = "not-an-email".to_string();
        assert!(account.validate().is_err());

        let mut account = valid_account();
        account.mobile_no = "12345".to_string();
        assert!(account.validate().is_err());
    }

    #[test]
    fn test_user_role_wire_format() {
        assert_eq!(
            serde_json::to_value(UserRole::SuperAdmin).unwrap(),
            json!("super_admin")
        );
        assert_eq!(
            serde_json::from_value::<UserRole>(json!("seller")).unwrap(),
            UserRole::Seller
        );
    }

    #[test]
    fn test_user_role_is_closed() {
        assert!(serde_json::from_value::<UserRole>(json!("root")).is_err());
    }

    #[actix_web::test]
    async fn test_user_account_extraction_from_extensions() {
        let user = get_dummy_user_account(
            "marketside".to_string(),
            "9876543210".to_string(),
            "buyer@example.com".to_string(),
            UserRole::User,
        );
        let req = actix_web::test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(user.clone());
        let extracted = UserAccount::from_request(&req, &mut Payload::None)
            .await
            .expect("extraction should succeed");
        assert_eq!(extracted.id, user.id);

        let bare = actix_web::test::TestRequest::default().to_http_request();
        assert!(UserAccount::from_request(&bare, &mut Payload::None)
            .await
            .is_err());
    }
}
