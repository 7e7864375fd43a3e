//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use projecthub_shared::HubError;
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Upstream errors
    #[error("Directory service unavailable")]
    DirectoryUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Validation
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),

            // Resources
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),

            // Upstream
            ApiError::DirectoryUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "DIRECTORY_UNAVAILABLE", self.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<HubError> for ApiError {
    fn from(err: HubError) -> Self {
        match err {
            HubError::Validation(msg) => ApiError::Validation(msg),
            HubError::Network(msg) => {
                tracing::warn!(error = %msg, "Directory service call failed");
                ApiError::DirectoryUnavailable
            }
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_validation_error_body() {
        let response = ApiError::Validation("Please enter your workspace subdomain".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Please enter your workspace subdomain"
        );
    }

    #[test]
    fn test_from_hub_error() {
        assert!(matches!(
            ApiError::from(HubError::Validation("bad".into())),
            ApiError::Validation(msg) if msg == "bad"
        ));
        assert!(matches!(
            ApiError::from(HubError::Network("refused".into())),
            ApiError::DirectoryUnavailable
        ));
    }
}
