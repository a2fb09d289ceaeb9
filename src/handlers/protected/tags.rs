// handlers/protected/tags.rs - /api/tags
//
// Tags are a shared vocabulary: anyone signed in may read and create them,
// only administrators may change or remove them.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::removed;
use crate::database::models::{is_hex_color, supplied, Tag, TagInput, TagPatch};
use crate::error::{ApiError, ApiResult};
use crate::handlers::parse_id;
use crate::middleware::{AuthUser, FieldErrors, JsonBody};
use crate::state::AppState;

const COLOR_MESSAGE: &str = "Color must be a hex value such as #3498db";

async fn fetch(state: &AppState, id: &str) -> ApiResult<Tag> {
    let id = parse_id(id, "Tag")?;
    state
        .store
        .get_tag(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag not found"))
}

fn check_color(errors: &mut FieldErrors, color: Option<&str>) {
    if let Some(color) = color.filter(|c| !c.is_empty()) {
        if !is_hex_color(color) {
            errors.push("color", COLOR_MESSAGE);
        }
    }
}

/// GET /api/tags
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Tag>>> {
    Ok(Json(state.store.list_tags().await?))
}

/// GET /api/tags/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Tag>> {
    Ok(Json(fetch(&state, &id).await?))
}

/// POST /api/tags
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(body): JsonBody<TagInput>,
) -> ApiResult<Json<Tag>> {
    let mut errors = FieldErrors::new();
    errors.required("name", body.name.as_deref(), "Name is required");
    check_color(&mut errors, body.color.as_deref());
    errors.finish()?;

    let tag = state
        .store
        .insert_tag(Tag::new(body.name.unwrap_or_default(), supplied(body.color)))
        .await?;
    tracing::debug!("User {} created tag {}", auth.id, tag.name);
    Ok(Json(tag))
}

/// PUT /api/tags/:id - administrators only
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TagInput>,
) -> ApiResult<Json<Tag>> {
    auth.ensure_admin()?;
    let mut tag = fetch(&state, &id).await?;

    let mut errors = FieldErrors::new();
    check_color(&mut errors, body.color.as_deref());
    errors.finish()?;

    TagPatch {
        name: supplied(body.name),
        color: supplied(body.color),
    }
    .apply(&mut tag);

    Ok(Json(state.store.update_tag(tag).await?))
}

/// DELETE /api/tags/:id - administrators only
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    auth.ensure_admin()?;
    let tag = fetch(&state, &id).await?;
    state.store.delete_tag(tag.id).await?;
    tracing::info!("Admin {} removed tag {}", auth.id, tag.name);
    Ok(removed("Tag"))
}
