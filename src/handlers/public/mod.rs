// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition plus the validator liveness probe.

pub mod login;
pub mod register;
pub mod validator;

pub use login::login_post;
pub use register::register_post;
pub use validator::validator_test;

use axum::Json;
use serde::Serialize;

use crate::auth::{generate_jwt, Claims};
use crate::config::SecurityConfig;
use crate::database::models::User;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Sign a session token carrying the user's id and role
pub fn issue_token(security: &SecurityConfig, user: &User) -> ApiResult<Json<TokenResponse>> {
    let claims = Claims::new(user.id, user.role, security.jwt_expiry_hours);
    let token = generate_jwt(&claims, &security.jwt_secret)?;
    Ok(Json(TokenResponse { token }))
}
