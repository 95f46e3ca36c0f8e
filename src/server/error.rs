//! HTTP error mapping
//!
//! Handlers return `ApiError`; application errors are classified by
//! downcasting to `SwarmError`. Bodies are JSON `{error, message}`.

use crate::error::SwarmError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Paths advertised in 404 bodies
pub const AVAILABLE_ENDPOINTS: [&str; 6] = [
    "/",
    "/health",
    "/agents",
    "/agents/{agent_name}",
    "/agents/{agent_name}/chat",
    "/github/projects",
];

/// Error returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// 400: the request named an unsupported value
    BadRequest(String),
    /// 404: no such agent or tracked project
    NotFound(String),
    /// 500: anything else
    Internal(String),
    /// Request body could not be extracted; keeps the extractor's status
    Rejected(StatusCode, String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected(status, _) => *status,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(m)
            | Self::NotFound(m)
            | Self::Internal(m)
            | Self::Rejected(_, m) => m,
        }
    }
}

impl From<SwarmError> for ApiError {
    fn from(err: SwarmError) -> Self {
        match err {
            SwarmError::InvalidArgument(m) => Self::BadRequest(m),
            SwarmError::AgentNotFound(slug) => Self::NotFound(format!("Agent not found: {}", slug)),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<SwarmError>() {
            Ok(swarm) => swarm.into(),
            Err(other) => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.message());
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self.message());
        }

        let body = json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested resource was not found.",
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_maps_to_bad_request() {
        let err: ApiError =
            anyhow::Error::from(SwarmError::InvalidArgument("bad model".to_string())).into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "bad model"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_agent_not_found_maps_to_404() {
        let err = ApiError::from(SwarmError::AgentNotFound("nope".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Agent not found: nope");
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err: ApiError = anyhow::anyhow!("socket closed").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(SwarmError::Github("down".to_string()));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_rejected_body_keeps_status_and_renders_json() {
        let response =
            ApiError::Rejected(StatusCode::UNPROCESSABLE_ENTITY, "unknown variant".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Unprocessable Entity");
        assert_eq!(body["message"], "unknown variant");
    }
}
