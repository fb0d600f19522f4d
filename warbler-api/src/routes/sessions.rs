/// Session lifecycle endpoints
///
/// The three flows composing the auth core:
///
/// - `POST /api/login` - credentials in, access + refresh tokens out
/// - `POST /api/refresh` - bearer refresh token in, new access token out
/// - `POST /api/revoke` - bearer refresh token in, session ended
///
/// Login deliberately answers an unknown email and a wrong password with
/// byte-identical 401 responses so the endpoint cannot be used to probe
/// which accounts exist. The same holds on the refresh path for
/// unknown, expired, and revoked tokens.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;
use warbler_shared::{
    auth::{extract, password, token},
    models::{refresh_token::RefreshToken, user::User},
};

use super::users::UserProfile;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response: profile plus one token of each kind
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Public profile fields
    #[serde(flatten)]
    pub user: UserProfile,

    /// Short-lived access token
    pub token: String,

    /// Long-lived opaque refresh token
    pub refresh_token: String,
}

/// Refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token
    pub token: String,
}

/// Login: verify credentials, open a session
///
/// On success the user gets an access token (stateless, short-lived)
/// and a refresh token (persisted, revocable). Each login adds a
/// session; concurrent sessions for one user are expected.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body
/// - `401 Unauthorized`: unknown email or wrong password, identically
/// - `500 Internal Server Error`: hashing, signing, or storage failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = match User::find_by_email(&state.db, &req.email).await? {
        Some(user) => user,
        None => {
            tracing::debug!("login rejected: unknown email");
            return Err(ApiError::Unauthorized);
        }
    };

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "login rejected: wrong password");
        return Err(ApiError::Unauthorized);
    }

    let access_token =
        token::issue_access_token(user.id, state.jwt_secret(), state.config.access_token_ttl())?;
    let refresh_token =
        RefreshToken::issue(&state.db, user.id, state.config.refresh_token_ttl()).await?;

    tracing::info!(user_id = %user.id, "session opened");

    Ok(Json(LoginResponse {
        user: user.into(),
        token: access_token,
        refresh_token: refresh_token.token,
    }))
}

/// Refresh: exchange a live refresh token for a new access token
///
/// The refresh token itself is not rotated; the same value stays valid
/// until its own expiry or an explicit revoke.
///
/// # Errors
///
/// - `401 Unauthorized`: missing header, or a token that is unknown,
///   expired, or revoked — indistinguishably
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<RefreshResponse>> {
    let bearer = extract::bearer_token(&headers)?;

    let record = RefreshToken::check(&state.db, &bearer)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = token::issue_access_token(
        record.user_id,
        state.jwt_secret(),
        state.config.access_token_ttl(),
    )?;

    Ok(Json(RefreshResponse {
        token: access_token,
    }))
}

/// Revoke: end the session carried by the bearer refresh token
///
/// Safe to repeat; a second revoke of the same token answers 404 rather
/// than failing.
///
/// # Errors
///
/// - `401 Unauthorized`: missing bearer header
/// - `404 Not Found`: token unknown or already revoked
pub async fn revoke(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let bearer = extract::bearer_token(&headers)?;

    if !RefreshToken::revoke(&state.db, &bearer).await? {
        return Err(ApiError::NotFound("refresh token not found".to_string()));
    }

    tracing::info!("session revoked");

    Ok(StatusCode::NO_CONTENT)
}
