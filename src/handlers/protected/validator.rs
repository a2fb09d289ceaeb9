// handlers/protected/validator.rs - /api/validator

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::gherkin::downloads::{feature_file, test_plan, FeatureFile, IssueKey, TestPlan};
use crate::gherkin::{normalize, CheckSet, Checker, FeatureType, ValidationReport};
use crate::middleware::JsonBody;

#[derive(Debug, Default, Deserialize)]
pub struct ContentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub feature_type: FeatureType,
    #[serde(default)]
    pub checks: CheckSet,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckParams {
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFileRequest {
    pub issue_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadTestPlanRequest {
    pub test_plan_key: Option<String>,
}

fn require_content(content: Option<String>) -> ApiResult<String> {
    content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Content is required"))
}

fn require_key(value: Option<String>, missing: &str) -> ApiResult<IssueKey> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(missing))?;
    value.parse().map_err(ApiError::bad_request)
}

/// POST /api/validator/validate - marker counts, always valid
pub async fn validate(JsonBody(body): JsonBody<ContentRequest>) -> ApiResult<Json<ValidationReport>> {
    let content = require_content(body.content)?;
    Ok(Json(ValidationReport::for_content(&content)))
}

/// POST /api/validator/check - line checker; `?format=text` for a plain report
pub async fn check(
    Query(params): Query<CheckParams>,
    JsonBody(body): JsonBody<CheckRequest>,
) -> ApiResult<Response> {
    let content = require_content(body.content)?;
    let report = Checker::new(body.feature_type, body.checks).check(&content);

    let as_text = params.format.as_deref().is_some_and(|f| f.eq_ignore_ascii_case("text"));
    Ok(if as_text {
        report.render_text().into_response()
    } else {
        Json(report).into_response()
    })
}

/// POST /api/validator/normalize
pub async fn normalize_content(JsonBody(body): JsonBody<ContentRequest>) -> ApiResult<Json<Value>> {
    let content = require_content(body.content)?;
    Ok(Json(json!({ "content": normalize(&content) })))
}

/// POST /api/validator/download-file - mock payload, no tracker call
pub async fn download_file(JsonBody(body): JsonBody<DownloadFileRequest>) -> ApiResult<Json<FeatureFile>> {
    let key = require_key(body.issue_key, "Issue key is required")?;
    Ok(Json(feature_file(&key)))
}

/// POST /api/validator/download-test-plan - mock payload, no tracker call
pub async fn download_test_plan(JsonBody(body): JsonBody<DownloadTestPlanRequest>) -> ApiResult<Json<TestPlan>> {
    let key = require_key(body.test_plan_key, "Test plan key is required")?;
    Ok(Json(test_plan(&key)))
}
