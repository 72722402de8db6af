//! Unified API error type with Axum `IntoResponse` support.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sn_table_client::FetchError;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Non-2xx from ServiceNow, passed through with its status.
    #[error("upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("bad gateway: {0}")]
    BadGateway(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(msg) => ApiError::NotFound(msg),
            FetchError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            FetchError::Upstream { status, body } => ApiError::Upstream { status, body },
            FetchError::Transport(msg) | FetchError::Decode(msg) => ApiError::BadGateway(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::BadGateway(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::Upstream { body, .. } => body,
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn not_found_response() {
        let err = ApiError::NotFound("Incident not found.".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Incident not found.");
    }

    #[tokio::test]
    async fn upstream_status_passes_through() {
        let err = ApiError::from(FetchError::Upstream {
            status: 403,
            body: "ACL denied".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "ACL denied");
    }

    #[test]
    fn non_error_upstream_status_becomes_bad_gateway() {
        let err = ApiError::Upstream {
            status: 302,
            body: String::new(),
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn fetch_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(FetchError::Unauthorized("x".into())).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(FetchError::Transport("timeout".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(FetchError::Decode("eof".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(FetchError::NotFound("gone".into())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_error_status() {
        assert_eq!(
            ApiError::Internal("catalog".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
