//! Unified API error type with Axum `IntoResponse` support.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use ac_diagnosis::DiagnosisError;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// The vision service failed or returned an uninterpretable reply.
    #[error("{0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<DiagnosisError> for ApiError {
    fn from(err: DiagnosisError) -> Self {
        match err {
            DiagnosisError::InputMissing => ApiError::BadRequest(err.to_string()),
            DiagnosisError::Parse(msg) => ApiError::Upstream(msg),
            DiagnosisError::Transport(_) => ApiError::Upstream(err.to_string()),
        }
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn bad_request_response() {
        let err = ApiError::BadRequest("no image supplied".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 400);
        assert!(json["error"].as_str().unwrap().contains("no image"));
    }

    #[tokio::test]
    async fn upstream_response_is_bad_gateway() {
        let err = ApiError::Upstream("vision service unavailable: timed out".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn input_missing_maps_to_bad_request() {
        let api_err: ApiError = DiagnosisError::InputMissing.into();
        assert!(matches!(api_err, ApiError::BadRequest(_)));
        assert_eq!(api_err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn parse_failure_keeps_message_verbatim() {
        let api_err: ApiError =
            DiagnosisError::Parse("Could not interpret the analysis from the AI.".into()).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Could not interpret the analysis from the AI.");
    }

    #[tokio::test]
    async fn transport_failure_maps_to_bad_gateway() {
        let api_err: ApiError = DiagnosisError::Transport("connection refused".into()).into();
        assert!(matches!(api_err, ApiError::Upstream(_)));
    }
}
