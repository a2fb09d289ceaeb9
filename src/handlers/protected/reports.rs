// handlers/protected/reports.rs - /api/reports

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::database::models::supplied;
use crate::error::ApiResult;
use crate::filter::TimeRange;
use crate::middleware::{AuthUser, CsvDownload};
use crate::services::csv::{domains_csv, keywords_csv};
use crate::services::{KeywordReportQuery, ReportService, Summary};
use crate::state::AppState;
use crate::types::ReportFormat;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordReportParams {
    pub format: Option<String>,
    pub domain: Option<String>,
    pub time_range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatParams {
    pub format: Option<String>,
}

/// GET /api/reports/keywords?format=&domain=&timeRange=
pub async fn keywords(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<KeywordReportParams>,
) -> ApiResult<Response> {
    let query = KeywordReportQuery {
        domain: supplied(params.domain),
        time_range: params.time_range.as_deref().and_then(TimeRange::parse),
    };
    let rows = ReportService::new(state.store.clone())
        .keywords(auth.id, &query, Utc::now())
        .await?;

    Ok(match ReportFormat::from_query(params.format.as_deref()) {
        ReportFormat::Csv => CsvDownload::new("keywords-report.csv", keywords_csv(&rows)).into_response(),
        ReportFormat::Json => Json(rows).into_response(),
    })
}

/// GET /api/reports/domains?format=
pub async fn domains(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<FormatParams>,
) -> ApiResult<Response> {
    let rows = ReportService::new(state.store.clone()).domains(auth.id).await?;

    Ok(match ReportFormat::from_query(params.format.as_deref()) {
        ReportFormat::Csv => CsvDownload::new("domains-report.csv", domains_csv(&rows)).into_response(),
        ReportFormat::Json => Json(rows).into_response(),
    })
}

/// GET /api/reports/summary
pub async fn summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Summary>> {
    Ok(Json(ReportService::new(state.store.clone()).summary(auth.id).await?))
}
