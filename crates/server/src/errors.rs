use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::AuthError;
use thiserror::Error;
use tracing::error;

/// Error vocabulary exposed to callers.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::AlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metric label for the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "invalid_argument",
            ApiError::AlreadyExists(_) => "already_exists",
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal => "internal",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidInput(msg) => ApiError::InvalidArgument(msg),
            AuthError::UserExists => ApiError::AlreadyExists("user already exists".into()),
            // never 401: do not hint which half of the credentials was wrong
            AuthError::InvalidCredentials => ApiError::InvalidArgument("invalid credentials".into()),
            AuthError::UnknownAccount => ApiError::NotFound("user not found".into()),
            other => {
                error!(code = other.code(), error = %other, "request failed");
                ApiError::Internal
            }
        }
    }
}

// Parser detail stays in the logs.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::InvalidArgument("content-type must be application/json".into())
            }
            _ => ApiError::InvalidArgument("malformed request body".into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}
