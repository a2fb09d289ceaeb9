use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body whose rejections use the API error shape
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_to_error(rejection)),
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::invalid_json("Expected request with `Content-Type: application/json`")
        }
        other => ApiError::invalid_json(other.body_text()),
    }
}

/// CSV file attachment
#[derive(Debug)]
pub struct CsvDownload {
    pub filename: String,
    pub body: String,
}

impl CsvDownload {
    pub fn new(filename: impl Into<String>, body: String) -> Self {
        Self {
            filename: filename.into(),
            body,
        }
    }
}

impl IntoResponse for CsvDownload {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_download_sets_attachment_headers() {
        let response = CsvDownload::new("keywords-report.csv", "Type,Text\n".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"keywords-report.csv\""
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    }
}
