use actix_web::rt::task::JoinHandle;
use anyhow::Context;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm as JWTAlgorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CustomJWTTokenError;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

pub fn spawn_blocking_with_tracing<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let current_span = tracing::Span::current();
    actix_web::rt::task::spawn_blocking(move || current_span.in_scope(f))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JWTClaims {
    pub sub: Uuid,
    pub exp: usize,
}

pub fn generate_jwt_token_for_user(
    user_id: Uuid,
    expiry_time: i64,
    secret: &SecretString,
) -> Result<SecretString, anyhow::Error> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(expiry_time))
        .context("Invalid JWT expiry timestamp")?
        .timestamp() as usize;
    let claims = JWTClaims {
        sub: user_id,
        exp: expiration,
    };
    let header = Header::new(JWTAlgorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
    let token = encode(&header, &claims, &encoding_key).context("Failed to generate token")?;
    Ok(SecretString::from(token))
}

#[tracing::instrument(name = "Decode JWT token", skip(token, secret))]
pub fn decode_token<T: Into<String>>(
    token: T,
    secret: &SecretString,
) -> Result<Uuid, CustomJWTTokenError> {
    let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let decoded = decode::<JWTClaims>(
        &token.into(),
        &decoding_key,
        &Validation::new(JWTAlgorithm::HS256),
    );
    match decoded {
        Ok(token_data) => Ok(token_data.claims.sub),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(CustomJWTTokenError::Expired),
            _ => Err(CustomJWTTokenError::Invalid("Invalid Token".to_string())),
        },
    }
}

pub fn generate_password_hash(password: SecretString) -> Result<SecretString, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).context("Invalid Argon2 parameters")?,
    )
    .hash_password(password.expose_secret().as_bytes(), &salt)
    .context("Failed to hash password")?
    .to_string();
    Ok(SecretString::from(password_hash))
}

pub fn verify_password_hash(
    expected_password_hash: SecretString,
    password_candidate: SecretString,
) -> Result<(), anyhow::Error> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC string format")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .context("Invalid password")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let password = SecretString::from("everythinghastostartsomewhere");
        let hash = generate_password_hash(password.clone()).unwrap();
        assert!(verify_password_hash(hash.clone(), password).is_ok());
        assert!(verify_password_hash(hash, SecretString::from("wrong")).is_err());
    }

    #[test]
    fn jwt_round_trip() {
        let secret = SecretString::from("jwt-test-secret");
        let user_id = Uuid::new_v4();
        let token = generate_jwt_token_for_user(user_id, 1, &secret).unwrap();
        let decoded = decode_token(token.expose_secret(), &secret).unwrap();
        assert_eq!(decoded, user_id);
    }

    #[test]
    fn jwt_rejects_wrong_secret() {
        let token =
            generate_jwt_token_for_user(Uuid::new_v4(), 1, &SecretString::from("secret-a"))
                .unwrap();
        let result = decode_token(token.expose_secret(), &SecretString::from("secret-b"));
        assert!(result.is_err());
    }
}
