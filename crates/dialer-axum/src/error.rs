//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and its nested errors to HTTP status codes and a JSON
//! error body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use dialer_core::{AuthError, CoreError, RepositoryError, TelephonyError, ValidationErrors};
use serde::Serialize;
use thiserror::Error;

/// Realm announced in `WWW-Authenticate`.
const AUTH_REALM: &str = "Basic realm=\"dialer\"";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Submitted fields were rejected; carries every error key.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Missing or wrong credentials.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Conflict (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The credential is over its request budget.
    #[error("Too many requests")]
    TooManyRequests,

    /// The telephony service failed or answered with garbage.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    error_type: Option<&'static str>,
    /// Per-key field errors for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, metadata) = match &self {
            Self::Validation(errors) => (
                Some("VALIDATION_FAILED"),
                serde_json::to_value(errors).ok(),
            ),
            Self::Unauthorized => (Some("UNAUTHORIZED"), None),
            Self::TooManyRequests => (Some("THROTTLED"), None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error while handling request");
                (None, None)
            }
            _ => (None, None),
        };

        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
            error_type,
            metadata,
        };

        let mut response = (status, axum::Json(body)).into_response();
        if matches!(self, Self::Unauthorized) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static(AUTH_REALM),
            );
        }
        response
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::InvalidFields(errors) => Self::Validation(errors),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::NotFound(msg) => Self::NotFound(msg),
            CoreError::PermissionDenied(msg) => Self::Forbidden(msg),
            CoreError::Telephony(e) => e.into(),
            CoreError::Auth(e) => e.into(),
            CoreError::Configuration(msg) => Self::Internal(format!("Config: {msg}")),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => Self::Conflict(msg),
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
            RepositoryError::Constraint(msg) => Self::BadRequest(msg),
        }
    }
}

impl From<TelephonyError> for HttpError {
    fn from(err: TelephonyError) -> Self {
        match err {
            TelephonyError::InvalidRequest { message } => Self::BadRequest(message),
            TelephonyError::Configuration { message } => {
                Self::Internal(format!("Telephony config: {message}"))
            }
            other => Self::BadGateway(other.to_string()),
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized,
            AuthError::Repository(e) => e.into(),
            AuthError::Hashing(msg) => Self::Internal(msg),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => Self::BadRequest(e.body_text()),
            other => Self::Internal(other.body_text()),
        }
    }
}
