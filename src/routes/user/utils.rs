use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::{AuthError, UserRegistrationError};
use super::models::{AddressModel, AuthCredentialModel, UserAccountModel};
use super::schemas::{CreateAddressRequest, CreateUserAccount, UserAccount, UserRole};
use crate::utils::{generate_password_hash, spawn_blocking_with_tracing, verify_password_hash};

#[tracing::instrument(name = "Fetch user by id", skip(pool))]
pub async fn fetch_user_by_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserAccount>, anyhow::Error> {
    let row = sqlx::query_as::<_, UserAccountModel>(
        r#"
        SELECT id, username, email, mobile_no, role, is_active, is_deleted, seller_verified
        FROM users WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching the user")
    })?;
    Ok(row.map(UserAccountModel::into_schema))
}

#[tracing::instrument(name = "Save user account", skip(pool, user_account))]
pub async fn save_user_account(
    pool: &PgPool,
    user_account: &CreateUserAccount,
) -> Result<UserAccount, UserRegistrationError> {
    // Role is normalized here, at the boundary; nothing downstream
    // compares role strings.
    let role = if user_account.register_as_seller {
        UserRole::Seller
    } else {
        UserRole::User
    };
    let user_id = Uuid::new_v4();
    let password_hash = spawn_blocking_with_tracing({
        let password = user_account.password.clone();
        move || generate_password_hash(password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    let row = sqlx::query_as::<_, UserAccountModel>(
        r#"
        INSERT INTO users (id, username, email, mobile_no, password_hash, role)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, username, email, mobile_no, role, is_active, is_deleted, seller_verified
        "#,
    )
    .bind(user_id)
    .bind(&user_account.username)
    .bind(&user_account.email)
    .bind(&user_account.mobile_no)
    .bind(password_hash.expose_secret())
    .bind(role)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            UserRegistrationError::DuplicateAccount(
                "An account with this email or username already exists".to_string(),
            )
        }
        _ => {
            tracing::error!("Failed to execute query: {:?}", e);
            UserRegistrationError::DatabaseError(
                "A database failure occurred while saving the user account".to_string(),
                e.into(),
            )
        }
    })?;
    Ok(row.into_schema())
}

#[tracing::instrument(name = "Validate user credentials", skip(pool, password))]
pub async fn validate_user_credentials(
    pool: &PgPool,
    email: &str,
    password: SecretString,
) -> Result<Uuid, AuthError> {
    let credentials = sqlx::query_as::<_, AuthCredentialModel>(
        "SELECT id, password_hash FROM users WHERE email = $1 AND is_deleted = false",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        AuthError::DatabaseError(
            "A database failure occurred while fetching credentials".to_string(),
            e.into(),
        )
    })?;

    // Run the verification against a dummy hash even when the account is
    // missing, so response timing does not leak account existence.
    let expected_hash = credentials
        .as_ref()
        .map(|row| row.password_hash.clone())
        .unwrap_or_else(|| {
            "$argon2id$v=19$m=15000,t=2,p=1$\
            gZiV/M1gPc22ElAH/Jh1Hw$\
            CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
                .to_string()
        });
    spawn_blocking_with_tracing(move || {
        verify_password_hash(SecretString::from(expected_hash), password)
    })
    .await
    .context("Failed to spawn blocking task.")?
    .map_err(|_| AuthError::InvalidCredentials("Invalid email or password".to_string()))?;

    credentials
        .map(|row| row.id)
        .ok_or_else(|| AuthError::InvalidCredentials("Invalid email or password".to_string()))
}

#[tracing::instrument(name = "Save address", skip(pool))]
pub async fn save_address(
    pool: &PgPool,
    user_id: Uuid,
    address: &CreateAddressRequest,
) -> Result<AddressModel, anyhow::Error> {
    sqlx::query_as::<_, AddressModel>(
        r#"
        INSERT INTO addresses (id, user_id, address_line, city, state, pincode, country)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, address_line, city, state, pincode, country, created_on
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&address.address_line)
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.pincode)
    .bind(&address.country)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while saving the address")
    })
}

#[tracing::instrument(name = "Fetch addresses for user", skip(pool))]
pub async fn fetch_addresses_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<AddressModel>, anyhow::Error> {
    sqlx::query_as::<_, AddressModel>(
        r#"
        SELECT id, user_id, address_line, city, state, pincode, country, created_on
        FROM addresses WHERE user_id = $1 ORDER BY created_on DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching addresses")
    })
}

#[tracing::instrument(name = "Mark seller verified", skip(pool))]
pub async fn mark_seller_verified(pool: &PgPool, seller_id: Uuid) -> Result<bool, anyhow::Error> {
    let result = sqlx::query(
        "UPDATE users SET seller_verified = true WHERE id = $1 AND role = 'seller'",
    )
    .bind(seller_id)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while verifying the seller")
    })?;
    Ok(result.rows_affected() > 0)
}
