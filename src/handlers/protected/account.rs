use axum::{extract::State, Extension, Json};

use crate::database::models::User;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/auth/me - the signed-in user, without the password hash
pub async fn me(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<Json<User>> {
    let user = state
        .store
        .get_user(auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user))
}
