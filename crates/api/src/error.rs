use std::any::Any;

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use greenhomes_core::error::CoreError;
use greenhomes_core::storage::StorageError;
use greenhomes_core::validation::FieldErrors;
use serde_json::json;

use crate::response::ApiResponse;

/// Message returned in place of any internal failure detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] so every failure leaves the server in the
/// standard envelope with `success: false`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `greenhomes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A lookup that matched nothing, with a human-readable message.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message (logged, never shown).
    #[error("Internal error: {0}")]
    InternalError(String),

    /// The path exists but does not accept the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Core(CoreError::InvalidFields(errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} not found"),
                    coded("NOT_FOUND", format!("{entity} with id {id} not found")),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                    coded("VALIDATION_ERROR", msg),
                ),
                CoreError::InvalidFields(fields) => (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    json!(fields),
                ),
                CoreError::Conflict(msg) => {
                    (StatusCode::CONFLICT, msg.clone(), coded("CONFLICT", msg))
                }
                CoreError::Unauthorized(msg) => (
                    StatusCode::UNAUTHORIZED,
                    msg.clone(),
                    coded("UNAUTHORIZED", msg),
                ),
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, msg.clone(), coded("FORBIDDEN", msg))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                msg.clone(),
                coded("NOT_FOUND", msg),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                coded("BAD_REQUEST", msg),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                coded(
                    "METHOD_NOT_ALLOWED",
                    "This endpoint does not support the request method".to_string(),
                ),
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request timed out".to_string(),
                coded(
                    "TIMEOUT",
                    "The request took too long to process".to_string(),
                ),
            ),
        };

        (status, axum::Json(ApiResponse::failure(message, errors))).into_response()
    }
}

/// Render a caught handler panic as the internal-error envelope.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    AppError::InternalError(format!("Handler panicked: {detail}")).into_response()
}

/// Wrap error responses produced outside the handlers (unmatched routes,
/// timeouts, media misses) in the envelope.
///
/// Responses that already carry a `Content-Type` are passed through.
pub async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(CONTENT_TYPE) {
        return response;
    }

    let err = match status {
        StatusCode::NOT_FOUND => AppError::NotFound("Resource not found".to_string()),
        StatusCode::METHOD_NOT_ALLOWED => AppError::MethodNotAllowed,
        StatusCode::REQUEST_TIMEOUT => AppError::Timeout,
        s if s.is_server_error() => AppError::InternalError(format!("Bare {s} response")),
        s => AppError::BadRequest(s.canonical_reason().unwrap_or("Bad request").to_string()),
    };
    let mut enveloped = err.into_response();
    *enveloped.status_mut() = status;
    enveloped
}

/// `errors` payload for failures that are not tied to request fields.
fn coded(code: &str, detail: String) -> serde_json::Value {
    json!({ "code": code, "detail": detail })
}

fn internal() -> (StatusCode, String, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_MESSAGE.to_string(),
        coded("INTERNAL_ERROR", INTERNAL_MESSAGE.to_string()),
    )
}

/// Classify a sqlx error into an HTTP status, message, and `errors` payload.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String, serde_json::Value) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "Resource not found".to_string(),
            coded("NOT_FOUND", "Resource not found".to_string()),
        ),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation.
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        let detail =
                            format!("Duplicate value violates unique constraint: {constraint}");
                        return (
                            StatusCode::CONFLICT,
                            "A record with these details already exists".to_string(),
                            coded("CONFLICT", detail),
                        );
                    }
                }
                // PostgreSQL foreign key violation.
                Some("23503") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "Referenced record does not exist".to_string(),
                        coded(
                            "INVALID_REFERENCE",
                            "Referenced record does not exist".to_string(),
                        ),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
