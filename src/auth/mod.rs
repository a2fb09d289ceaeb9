use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// Session token claims. Verification is stateless: everything the
/// middleware needs travels inside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, role: Role, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            user_id,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Validate JWT token signature and expiry and extract claims
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

/// Hash a password on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_tokens_validate() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, Role::Admin, 1);
        let token = generate_jwt(&claims, SECRET).unwrap();

        let decoded = validate_jwt(&token, SECRET).unwrap();
        assert_eq!(decoded.user_id, user_id);
        assert_eq!(decoded.role, Role::Admin);
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let claims = Claims::new(Uuid::new_v4(), Role::User, 1);
        let token = generate_jwt(&claims, "other-secret").unwrap();

        assert!(matches!(validate_jwt(&token, SECRET), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_tokens() {
        let mut claims = Claims::new(Uuid::new_v4(), Role::User, 1);
        claims.iat -= 3 * 3600;
        claims.exp = claims.iat + 3600;
        let token = generate_jwt(&claims, SECRET).unwrap();

        assert!(matches!(validate_jwt(&token, SECRET), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn refuses_empty_secret() {
        let claims = Claims::new(Uuid::new_v4(), Role::User, 1);
        assert!(matches!(generate_jwt(&claims, ""), Err(AuthError::InvalidSecret)));
    }

    #[tokio::test]
    async fn hashed_passwords_verify() {
        let hash = hash_password("hunter22".to_string(), 4).await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".to_string(), hash).await.unwrap());
    }
}
