use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::Role;

/// Header the browser client sends its session token in
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated user context extracted from JWT
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            role: claims.role,
        }
    }
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Owners and administrators may act on a record
    pub fn can_access(&self, owner: Uuid) -> bool {
        self.id == owner || self.is_admin()
    }

    pub fn ensure_can_access(&self, owner: Uuid) -> Result<(), ApiError> {
        if self.can_access(owner) {
            Ok(())
        } else {
            tracing::warn!("User {} denied access to record owned by {}", self.id, owner);
            Err(ApiError::unauthorized("User not authorized"))
        }
    }

    pub fn ensure_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!("User {} attempted an admin-only operation", self.id);
            Err(ApiError::forbidden("Admin access required"))
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers())
        .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

    let claims = validate_jwt(token, &state.config.security.jwt_secret)?;

    // Convert claims to AuthUser and inject into request
    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated user {} ({})", auth_user.id, auth_user.role);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the token from `x-auth-token` or an `Authorization: Bearer` header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Option<&str> {
    let custom = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if custom.is_some() {
        return custom;
    }

    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_custom_header_first() {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, HeaderValue::from_static("abc"));
        headers.insert("authorization", HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_jwt_from_headers(&headers), Some("abc"));
    }

    #[test]
    fn falls_back_to_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_jwt_from_headers(&headers), Some("xyz"));
    }

    #[test]
    fn blank_custom_header_falls_through_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, HeaderValue::from_static("   "));
        headers.insert("authorization", HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_jwt_from_headers(&headers), Some("xyz"));
    }

    #[test]
    fn ignores_blank_and_non_bearer_values() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_jwt_from_headers(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_jwt_from_headers(&headers), None);
    }

    #[test]
    fn owners_and_admins_pass_access_checks() {
        let owner = Uuid::new_v4();
        let user = AuthUser { id: owner, role: Role::User };
        let stranger = AuthUser { id: Uuid::new_v4(), role: Role::User };
        let admin = AuthUser { id: Uuid::new_v4(), role: Role::Admin };

        assert!(user.ensure_can_access(owner).is_ok());
        assert!(admin.ensure_can_access(owner).is_ok());
        assert!(matches!(stranger.ensure_can_access(owner), Err(ApiError::Unauthorized(_))));
        assert!(matches!(stranger.ensure_admin(), Err(ApiError::Forbidden(_))));
    }
}
