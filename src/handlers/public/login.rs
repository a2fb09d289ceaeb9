// handlers/public/login.rs - POST /api/auth handler

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{issue_token, TokenResponse};
use crate::auth::verify_password;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{FieldErrors, JsonBody};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Exchange credentials for a session token. Unknown email and wrong
/// password answer identically.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let mut errors = FieldErrors::new();
    errors
        .email("email", body.email.as_deref(), "Please include a valid email")
        .required("password", body.password.as_deref(), "Password is required");
    errors.finish()?;

    let email = body.email.unwrap_or_default().trim().to_lowercase();
    let invalid = || ApiError::bad_request("Invalid Credentials");

    let user = state.store.find_user_by_email(&email).await?.ok_or_else(invalid)?;
    let matches = verify_password(body.password.unwrap_or_default(), user.password_hash.clone()).await?;
    if !matches {
        tracing::info!("Rejected login for user {}", user.id);
        return Err(invalid());
    }

    issue_token(&state.config.security, &user)
}
