// handlers/protected/keywords.rs - /api/keywords

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::removed;
use crate::database::models::{supplied, Keyword, KeywordInput, KeywordPatch};
use crate::error::{ApiError, ApiResult};
use crate::filter::KeywordFilter;
use crate::handlers::parse_id;
use crate::middleware::{AuthUser, FieldErrors, JsonBody};
use crate::state::AppState;
use crate::types::KeywordType;

#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub tag: Option<String>,
}

/// Fetch a keyword the caller may act on
async fn load(state: &AppState, auth: &AuthUser, id: &str) -> ApiResult<Keyword> {
    let id = parse_id(id, "Keyword")?;
    let keyword = state
        .store
        .get_keyword(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Keyword not found"))?;
    auth.ensure_can_access(keyword.user)?;
    Ok(keyword)
}

/// GET /api/keywords - the caller's keywords, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<Keyword>>> {
    let mut errors = FieldErrors::new();
    let kind = errors.parsed::<KeywordType>("type", query.kind.as_deref());
    errors.finish()?;

    let mut filter = KeywordFilter::for_owner(auth.id);
    if let Some(domain) = supplied(query.domain) {
        filter = filter.with_domain(domain);
    }
    if let Some(kind) = kind {
        filter = filter.with_kind(kind);
    }
    if let Some(tag) = supplied(query.tag) {
        filter = filter.with_tag(tag);
    }

    Ok(Json(state.store.list_keywords(&filter).await?))
}

/// GET /api/keywords/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Keyword>> {
    Ok(Json(load(&state, &auth, &id).await?))
}

/// POST /api/keywords
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(body): JsonBody<KeywordInput>,
) -> ApiResult<Json<Keyword>> {
    let mut errors = FieldErrors::new();
    errors
        .required("text", body.text.as_deref(), "Text is required")
        .required("type", body.kind.as_deref(), "Type is required");
    let kind = errors.parsed::<KeywordType>("type", body.kind.as_deref());
    errors.finish()?;

    let Some(kind) = kind else {
        return Err(ApiError::bad_request("Type is required"));
    };
    let mut keyword = Keyword::new(auth.id, body.text.unwrap_or_default(), kind);
    keyword.domain = supplied(body.domain);
    keyword.tags = body.tags.unwrap_or_default();

    let keyword = state.store.insert_keyword(keyword).await?;
    tracing::debug!("User {} created keyword {}", auth.id, keyword.id);
    Ok(Json(keyword))
}

/// PUT /api/keywords/:id - only supplied fields change
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<KeywordInput>,
) -> ApiResult<Json<Keyword>> {
    let mut keyword = load(&state, &auth, &id).await?;

    let mut errors = FieldErrors::new();
    let kind = errors.parsed::<KeywordType>("type", body.kind.as_deref());
    errors.finish()?;

    KeywordPatch {
        text: supplied(body.text),
        kind,
        domain: supplied(body.domain),
        tags: body.tags,
    }
    .apply(&mut keyword);

    Ok(Json(state.store.update_keyword(keyword).await?))
}

/// DELETE /api/keywords/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let keyword = load(&state, &auth, &id).await?;
    state.store.delete_keyword(keyword.id).await?;
    tracing::debug!("User {} removed keyword {}", auth.id, keyword.id);
    Ok(removed("Keyword"))
}
