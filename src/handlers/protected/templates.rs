// handlers/protected/templates.rs - /api/templates

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::removed;
use crate::database::models::{supplied, Template, TemplateInput, TemplatePatch};
use crate::error::{ApiError, ApiResult};
use crate::handlers::parse_id;
use crate::middleware::{AuthUser, FieldErrors, JsonBody};
use crate::state::AppState;

async fn fetch(state: &AppState, id: &str) -> ApiResult<Template> {
    let id = parse_id(id, "Template")?;
    state
        .store
        .get_template(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Template not found"))
}

/// Fetch a template the caller may modify
async fn load_for_write(state: &AppState, auth: &AuthUser, id: &str) -> ApiResult<Template> {
    let template = fetch(state, id).await?;
    auth.ensure_can_access(template.user)?;
    Ok(template)
}

/// GET /api/templates - the caller's own plus every public template
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Template>>> {
    Ok(Json(state.store.list_visible_templates(auth.id).await?))
}

/// GET /api/templates/:id - public templates are readable by anyone
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Template>> {
    let template = fetch(&state, &id).await?;
    if !template.is_visible_to(auth.id, auth.is_admin()) {
        return Err(ApiError::unauthorized("User not authorized"));
    }
    Ok(Json(template))
}

/// POST /api/templates
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(body): JsonBody<TemplateInput>,
) -> ApiResult<Json<Template>> {
    let mut errors = FieldErrors::new();
    errors
        .required("name", body.name.as_deref(), "Name is required")
        .required("content", body.content.as_deref(), "Content is required");
    errors.finish()?;

    let mut template = Template::new(auth.id, body.name.unwrap_or_default(), body.content.unwrap_or_default());
    template.description = supplied(body.description);
    template.tags = body.tags.unwrap_or_default();
    template.is_public = body.is_public.unwrap_or(false);

    Ok(Json(state.store.insert_template(template).await?))
}

/// PUT /api/templates/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TemplateInput>,
) -> ApiResult<Json<Template>> {
    let mut template = load_for_write(&state, &auth, &id).await?;
    TemplatePatch {
        name: supplied(body.name),
        description: supplied(body.description),
        content: supplied(body.content),
        tags: body.tags,
        is_public: body.is_public,
    }
    .apply(&mut template);

    Ok(Json(state.store.update_template(template).await?))
}

/// DELETE /api/templates/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let template = load_for_write(&state, &auth, &id).await?;
    state.store.delete_template(template.id).await?;
    Ok(removed("Template"))
}
