//! Error-to-response mapping for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use db::DbError;
use lifecycle::LifecycleError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("internal error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::NotFound,
            DbError::Conflict(msg) => Self::Conflict(msg.to_string()),
            other => {
                tracing::error!("database error: {other}");
                Self::Internal
            }
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::UnknownStatus(s) => Self::BadRequest(format!("unknown status: {s}")),
            LifecycleError::MissingField(f) => Self::BadRequest(format!("missing field: {f}")),
            LifecycleError::Database(db) => db.into(),
            LifecycleError::Service(e) => {
                tracing::error!("service error: {e}");
                Self::Internal
            }
        }
    }
}

impl From<auth::AuthError> for ApiError {
    fn from(err: auth::AuthError) -> Self {
        match err {
            auth::AuthError::InvalidCredentials | auth::AuthError::InvalidToken(_) => {
                Self::Unauthorized
            }
            auth::AuthError::Forbidden(_) => Self::Forbidden,
            auth::AuthError::Hash(e) => {
                tracing::error!("bcrypt error: {e}");
                Self::Internal
            }
        }
    }
}
