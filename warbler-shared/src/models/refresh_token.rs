/// Refresh token records and lifecycle
///
/// A refresh token is an opaque 256-bit value ([`crate::auth::refresh`])
/// persisted with its owner, an expiry weeks out, and a nullable
/// revocation timestamp. The invariant: a token is usable if and only if
/// `revoked_at` is null and the current time is before `expires_at`.
///
/// Rows are never deleted — a revoked or expired token stays on record
/// for audit. Expiry is enforced at read time, so no background sweep is
/// needed for correctness. A user holds one row per active login
/// session; nothing forces a single session per user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE refresh_tokens (
///     token TEXT PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL,
///     revoked_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::refresh::generate_refresh_token;

/// Attempts before a string of generation collisions becomes an error
const MAX_GENERATION_ATTEMPTS: u32 = 3;

/// A persisted refresh token
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshToken {
    /// The opaque token value (hex, 64 chars)
    pub token: String,

    /// The user this session belongs to
    pub user_id: Uuid,

    /// When the token was issued
    pub created_at: DateTime<Utc>,

    /// Hard expiry; the token is unusable from this instant on
    pub expires_at: DateTime<Utc>,

    /// When the token was explicitly revoked, if ever
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Whether this record is currently usable
    pub fn is_usable(&self) -> bool {
        self.revoked_at.is_none() && self.expires_at > Utc::now()
    }

    /// Issues and persists a new refresh token for a user
    ///
    /// The value comes from the OS CSPRNG. Colliding with an existing
    /// row is treated as a generation failure: the insert is retried
    /// with a fresh value, never an overwrite.
    ///
    /// # Errors
    ///
    /// Propagates database errors; running out of retries returns the
    /// final collision error.
    pub async fn issue(
        pool: &PgPool,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<Self, sqlx::Error> {
        let expires_at = Utc::now() + ttl;
        let mut last_err = None;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let token = generate_refresh_token();

            let result = sqlx::query_as::<_, RefreshToken>(
                r#"
                INSERT INTO refresh_tokens (token, user_id, expires_at)
                VALUES ($1, $2, $3)
                RETURNING token, user_id, created_at, expires_at, revoked_at
                "#,
            )
            .bind(&token)
            .bind(user_id)
            .bind(expires_at)
            .fetch_one(pool)
            .await;

            match result {
                Ok(record) => return Ok(record),
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    tracing::warn!(attempt, "refresh token value collision, regenerating");
                    last_err = Some(sqlx::Error::Database(db_err));
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.expect("collision loop ran at least once"))
    }

    /// Looks up a token and validates it in one step
    ///
    /// Returns `Some(record)` only for a usable token. An absent row and
    /// a present-but-expired/revoked row both come back as `None`, so
    /// this lookup cannot be used to probe which token values ever
    /// existed.
    pub async fn check(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        let record = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT token, user_id, created_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        match record {
            Some(record) if record.is_usable() => Ok(Some(record)),
            Some(record) => {
                tracing::debug!(
                    user_id = %record.user_id,
                    revoked = record.revoked_at.is_some(),
                    "refresh token present but not usable"
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Revokes a token by value
    ///
    /// Returns whether a live row was revoked. Revoking an unknown or
    /// already-revoked token returns `false` rather than failing, so a
    /// confused client can safely retry.
    pub async fn revoke(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(expires_in: Duration, revoked: bool) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            token: "ab".repeat(32),
            user_id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
        }
    }

    #[test]
    fn test_live_token_is_usable() {
        assert!(record(Duration::days(60), false).is_usable());
    }

    #[test]
    fn test_expired_token_is_not_usable() {
        assert!(!record(Duration::seconds(-1), false).is_usable());
    }

    #[test]
    fn test_revoked_token_is_not_usable_despite_future_expiry() {
        assert!(!record(Duration::days(60), true).is_usable());
    }
}
