/// Error handling for the API server
///
/// A single `ApiError` is the boundary between internal failure detail
/// and what a client sees. Handlers return `ApiResult<T>`; every
/// internal error variant is classified here into one of four coarse
/// outcomes before it reaches the transport:
///
/// - **bad request** (400): unparseable or invalid input
/// - **unauthorized** (401): any credential failure — one fixed body,
///   whichever sub-check rejected, so neither accounts nor tokens can be
///   enumerated by probing
/// - **not found** (404): the addressed resource does not exist
/// - **internal** (500): server-side failure; the cause goes to the
///   operator log, never to the caller
///
/// Plus the two CRUD conveniences 403 (ownership) and 409 (duplicates).
/// A failure in one request's handling never affects another: errors
/// propagate to the response and stop there.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use warbler_shared::auth::{
    extract::ExtractError, middleware::AuthError, password::PasswordError, token::TokenError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    ///
    /// Deliberately carries nothing: every credential failure renders
    /// the same way.
    Unauthorized,

    /// Forbidden (403) - authenticated but not the owner
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g. duplicate email
    Conflict(String),

    /// Internal server error (500)
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ApiError::Unauthorized => write!(f, "unauthorized"),
            ApiError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                // Operators get the cause; clients get a fixed line
                tracing::error!(cause = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Database errors: missing rows are 404, duplicate emails are 409,
/// everything else is internal
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("email already exists".to_string());
                    }
                    return ApiError::Conflict(format!("constraint violation: {}", constraint));
                }
                ApiError::Internal(format!("database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("database error: {}", err)),
        }
    }
}

/// Hashing failures are server-side; a wrong password is not an error
/// and never reaches this conversion
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("password operation failed: {}", err))
    }
}

/// Token rejection is a credential failure; only a signing failure at
/// issuance is server-side
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => ApiError::Internal(format!("token signing failed: {}", msg)),
            TokenError::Invalid => ApiError::Unauthorized,
        }
    }
}

/// A missing or unreadable credential header is the same failure class
/// as a bad credential
impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        tracing::debug!(cause = %err, "credential extraction failed");
        ApiError::Unauthorized
    }
}

/// Gate rejections are already uniform
impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

/// Request DTO validation failures are client errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let detail: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    match &error.message {
                        Some(message) => format!("{}: {}", field, message),
                        None => format!("{}: invalid value", field),
                    }
                })
            })
            .collect();

        ApiError::BadRequest(detail.join("; "))
    }
}
