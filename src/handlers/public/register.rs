// handlers/public/register.rs - POST /api/users handler

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{issue_token, TokenResponse};
use crate::auth::hash_password;
use crate::database::models::{NewUser, User};
use crate::error::ApiResult;
use crate::middleware::{FieldErrors, JsonBody};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create an account with the `user` role and sign the caller in
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let mut errors = FieldErrors::new();
    errors
        .required("name", body.name.as_deref(), "Name is required")
        .email("email", body.email.as_deref(), "Please include a valid email")
        .min_length(
            "password",
            body.password.as_deref(),
            6,
            "Please enter a password with 6 or more characters",
        );
    errors.finish()?;

    let security = &state.config.security;
    let password_hash = hash_password(body.password.unwrap_or_default(), security.bcrypt_cost).await?;
    let user = User::new(NewUser {
        name: body.name.unwrap_or_default().trim().to_string(),
        email: body.email.unwrap_or_default().trim().to_lowercase(),
        password_hash,
    });

    let user = state.store.insert_user(user).await?;
    tracing::info!("Registered user {}", user.id);
    issue_token(security, &user)
}
