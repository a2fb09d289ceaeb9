// handlers/protected/domains.rs - /api/domains

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::removed;
use crate::database::models::{supplied, Domain, DomainInput, DomainPatch};
use crate::error::{ApiError, ApiResult};
use crate::handlers::parse_id;
use crate::middleware::{AuthUser, FieldErrors, JsonBody};
use crate::state::AppState;

async fn load(state: &AppState, auth: &AuthUser, id: &str) -> ApiResult<Domain> {
    let id = parse_id(id, "Domain")?;
    let domain = state
        .store
        .get_domain(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Domain not found"))?;
    auth.ensure_can_access(domain.user)?;
    Ok(domain)
}

/// GET /api/domains
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Domain>>> {
    Ok(Json(state.store.list_domains(auth.id).await?))
}

/// GET /api/domains/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Domain>> {
    Ok(Json(load(&state, &auth, &id).await?))
}

/// POST /api/domains - names are unique across all users
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(body): JsonBody<DomainInput>,
) -> ApiResult<Json<Domain>> {
    let mut errors = FieldErrors::new();
    errors.required("name", body.name.as_deref(), "Name is required");
    errors.finish()?;

    let domain = Domain::new(auth.id, body.name.unwrap_or_default(), supplied(body.description));
    Ok(Json(state.store.insert_domain(domain).await?))
}

/// PUT /api/domains/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<DomainInput>,
) -> ApiResult<Json<Domain>> {
    let mut domain = load(&state, &auth, &id).await?;
    DomainPatch {
        name: supplied(body.name),
        description: supplied(body.description),
    }
    .apply(&mut domain);

    Ok(Json(state.store.update_domain(domain).await?))
}

/// DELETE /api/domains/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let domain = load(&state, &auth, &id).await?;
    state.store.delete_domain(domain.id).await?;
    Ok(removed("Domain"))
}
