/// User account endpoints
///
/// # Endpoints
///
/// - `POST /api/users` - register a new account (public)
/// - `PUT /api/users` - replace the authenticated user's credentials
///
/// Responses carry only public profile fields; the password hash never
/// leaves the model layer, and nothing is returned on failed attempts.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use warbler_shared::{
    auth::{middleware::AuthContext, password},
    models::user::{CreateUser, User},
};

/// Registration / credential update request
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Email address
    #[validate(email(message = "invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Public profile fields, safe to return to the account holder
#[derive(Debug, Serialize)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Email address
    pub email: String,

    /// Whether the billing partner has upgraded this account
    pub is_premium: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            is_premium: user.is_premium,
        }
    }
}

/// Registers a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "secret123" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `409 Conflict`: email already registered
/// - `500 Internal Server Error`: hashing or storage failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Replaces the authenticated user's email and password
///
/// The target account is the gate-resolved identity; a client cannot
/// update anyone else's credentials.
///
/// # Endpoint
///
/// ```text
/// PUT /api/users
/// Authorization: Bearer <access token>
/// Content-Type: application/json
///
/// { "email": "new@example.com", "password": "newsecret123" }
/// ```
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<UserProfile>> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::update_credentials(&state.db, auth.user_id, &req.email, &password_hash)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(user.into()))
}
