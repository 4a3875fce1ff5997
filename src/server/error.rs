//! HTTP error responses

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::CmsError;

/// Error returned by API handlers, rendered as `{"error": message}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
    /// Malformed request body or query string
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    /// Map a content error to a response, logging server-side failures.
    /// `context` is the client-facing message, e.g. "Failed to fetch articles".
    pub fn from_cms(context: &str, err: CmsError) -> Self {
        match err {
            CmsError::InvalidSlug(_) => ApiError::BadRequest("Invalid slug format".to_string()),
            CmsError::ArticleExists(_) => {
                ApiError::BadRequest("Article with this slug already exists".to_string())
            }
            e if e.is_not_found() => {
                tracing::debug!("{}: {}", context, e);
                ApiError::NotFound(context.to_string())
            }
            e if e.is_conflict() => {
                tracing::warn!("{}: {}", context, e);
                ApiError::Conflict(format!("{}: content changed on GitHub, reload and retry", context))
            }
            e => {
                tracing::error!("{}: {}", context, e);
                ApiError::Internal(context.to_string())
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
