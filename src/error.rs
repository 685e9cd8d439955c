use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Every failure a handler can surface. Nothing propagates past the response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body or path could not be decoded into the expected shape.
    #[error("{0}")]
    Decode(String),
    /// A required field was missing or empty on an edit payload.
    #[error("missing required field `{0}`")]
    Validation(String),
    /// Well-formed request that breaks an input rule (e.g. bad email).
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    /// Caller-correctable store failure: constraint violation, unknown id.
    #[error("{0:#}")]
    Store(anyhow::Error),
    #[error("{0:#}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_)
            | ApiError::Validation(_)
            | ApiError::Invalid(_)
            | ApiError::Store(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(e) => error!(error = format!("{e:#}"), "internal error"),
            ApiError::Store(e) => warn!(error = format!("{e:#}"), "store rejected request"),
            other => debug!(%status, error = %other, "request rejected"),
        }
        match self {
            // edits with missing fields answer with a bare status
            ApiError::Validation(_) => status.into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Decode(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: ApiError) -> (StatusCode, String) {
        let res = err.into_response();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn validation_has_no_body() {
        let (status, body) = body_of(ApiError::Validation("id".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn store_error_writes_text() {
        let (status, body) =
            body_of(ApiError::Store(anyhow::anyhow!("violates foreign key constraint"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("foreign key"));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Decode("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
