/// Billing partner webhook
///
/// # Endpoint
///
/// ```text
/// POST /api/webhooks/partner
/// Authorization: ApiKey <pre-shared key>
/// Content-Type: application/json
///
/// { "event": "user.upgraded", "data": { "user_id": "<uuid>" } }
/// ```
///
/// Only `user.upgraded` has an effect; other events are acknowledged
/// and dropped so the partner does not retry them.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;
use warbler_shared::{auth::api_key, auth::extract, models::user::User};

/// Webhook payload
#[derive(Debug, Deserialize)]
pub struct PartnerEvent {
    /// Event name
    pub event: String,

    /// Event payload
    pub data: PartnerEventData,
}

/// Payload of a partner event
#[derive(Debug, Deserialize)]
pub struct PartnerEventData {
    /// The affected user
    pub user_id: Uuid,
}

/// Handles a partner event
///
/// # Errors
///
/// - `401 Unauthorized`: missing or wrong API key
/// - `404 Not Found`: upgraded user does not exist
pub async fn partner_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<PartnerEvent>,
) -> ApiResult<StatusCode> {
    let presented = extract::api_key(&headers)?;

    if !api_key::verify_api_key(&presented, &state.config.auth.partner_api_key) {
        tracing::debug!("partner webhook rejected: wrong api key");
        return Err(ApiError::Unauthorized);
    }

    if event.event != "user.upgraded" {
        tracing::debug!(event = %event.event, "ignoring partner event");
        return Ok(StatusCode::NO_CONTENT);
    }

    User::upgrade_to_premium(&state.db, event.data.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    tracing::info!(user_id = %event.data.user_id, "user upgraded to premium");

    Ok(StatusCode::NO_CONTENT)
}
