use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use casting_core::claims::AuthError;
use casting_core::error::CoreError;

use crate::response::ErrorResponse;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{success, error, message}`
/// envelope used by every failing request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `casting_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No route, or a path segment that cannot name a record.
    #[error("No route: {0}")]
    NoRoute(String),

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Core(CoreError::Unauthorized(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } | CoreError::EmptyCollection { .. } => {
                    (StatusCode::NOT_FOUND, format!("resource not found, {core}"))
                }
                CoreError::Unprocessable(msg) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, format!("unprocessable, {msg}"))
                }
                // The reason is logged where the token is checked, never echoed.
                CoreError::Unauthorized(auth) => (
                    StatusCode::from_u16(auth.status_code()).unwrap_or(StatusCode::UNAUTHORIZED),
                    "Authentication error".to_string(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::NoRoute(detail) => {
                (StatusCode::NOT_FOUND, format!("resource not found, {detail}"))
            }
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, "request timeout".to_string()),
        };

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

fn internal_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - Errors raised by the database itself (constraint violations and the
///   like) map to 422 carrying the driver message.
/// - Everything else (pool exhaustion, I/O) maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::Database(db_err) => {
            tracing::warn!(error = %db_err, "Store rejected write");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("unprocessable, {}", db_err.message()),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
