/// Access token issuance and validation
///
/// Access tokens are stateless, HS256-signed claim sets: the same
/// process-wide secret signs and verifies, which is acceptable because
/// issuer and verifier are one trusted service. They are deliberately
/// short-lived and are never persisted or individually revocable;
/// revocation happens by letting them expire. Long-lived sessions are
/// carried by the opaque refresh tokens in
/// [`crate::models::refresh_token`] instead.
///
/// # Claims
///
/// - `sub`: the user ID in canonical string form
/// - `iss`: always [`ISSUER`], distinguishing this token class from any
///   other token the system might mint later
/// - `iat` / `exp`: issue and expiry as Unix timestamps
///
/// # Uniform rejection
///
/// [`validate_access_token`] rejects bad signatures, malformed tokens,
/// expired tokens, issuer mismatches, and unparseable subjects — all as
/// the single [`TokenError::Invalid`] variant. Which check failed is
/// visible only in debug logs, never to the caller, so the validator
/// cannot be used as an oracle.
///
/// # Example
///
/// ```
/// use warbler_shared::auth::token::{issue_access_token, validate_access_token};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-signing-secret-of-at-least-32-bytes!!";
/// let user_id = Uuid::new_v4();
///
/// let token = issue_access_token(user_id, secret, Duration::hours(1))?;
/// assert_eq!(validate_access_token(&token, secret)?, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed issuer tag for access tokens
///
/// A token carrying any other issuer is rejected even if correctly
/// signed, so tokens minted for another purpose can never authenticate a
/// request here.
pub const ISSUER: &str = "warbler-access";

/// Error type for access token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign a new token
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// The token was rejected
    ///
    /// Deliberately carries no detail about which check failed.
    #[error("invalid token")]
    Invalid,
}

/// Claim set carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject: user ID in canonical string form
    sub: String,

    /// Issuer: always [`ISSUER`]
    iss: String,

    /// Issued at (Unix timestamp)
    iat: i64,

    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// Issues a signed access token for a user
///
/// Sets `iat` to now and `exp` to now + `ttl`. The token is valid until
/// `exp` elapses and cannot be revoked earlier, so `ttl` should stay
/// short (hours to a day).
///
/// # Errors
///
/// Returns [`TokenError::Signing`] if encoding fails.
pub fn issue_access_token(
    user_id: Uuid,
    secret: &str,
    ttl: Duration,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iss: ISSUER.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(format!("token encoding failed: {}", e)))
}

/// Validates an access token and resolves the subject user ID
///
/// Checks, in order: signature, structure, issuer, expiry (a token whose
/// `exp` is at or before the current second is already invalid — no
/// leeway), and that the subject parses as a UUID.
///
/// # Errors
///
/// Every rejection is [`TokenError::Invalid`]; the underlying cause is
/// logged at debug level for operators only.
pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(cause = %e, "access token rejected");
        TokenError::Invalid
    })?;

    // The library treats exp == now as still valid; the contract here is
    // that expiry is inclusive.
    if data.claims.exp <= Utc::now().timestamp() {
        tracing::debug!("access token rejected: expired");
        return Err(TokenError::Invalid);
    }

    Uuid::parse_str(&data.claims.sub).map_err(|e| {
        tracing::debug!(cause = %e, "access token rejected: bad subject");
        TokenError::Invalid
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-at-least-32-bytes-long";

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = issue_access_token(user_id, SECRET, Duration::hours(1))
            .expect("issue should succeed");

        let resolved = validate_access_token(&token, SECRET).expect("token should validate");
        assert_eq!(resolved, user_id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();

        let result = validate_access_token(&token, "a-different-secret-also-32-bytes-long");
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_zero_ttl_is_rejected_immediately() {
        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::zero()).unwrap();

        assert!(matches!(
            validate_access_token(&token, SECRET),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Negative ttl puts exp in the past
        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::hours(-1)).unwrap();

        assert!(matches!(
            validate_access_token(&token, SECRET),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        for garbage in ["", "not.a.jwt", "a.b", "eyJhbGciOiJIUzI1NiJ9"] {
            assert!(matches!(
                validate_access_token(garbage, SECRET),
                Err(TokenError::Invalid)
            ));
        }
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        // A correctly signed token of a different class must not pass
        #[derive(Serialize)]
        struct ForeignClaims {
            sub: String,
            iss: String,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now();
        let claims = ForeignClaims {
            sub: Uuid::new_v4().to_string(),
            iss: "warbler-password-reset".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validate_access_token(&token, SECRET),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_unparseable_subject_is_rejected() {
        #[derive(Serialize)]
        struct BadSubjectClaims {
            sub: String,
            iss: String,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now();
        let claims = BadSubjectClaims {
            sub: "not-a-uuid".to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validate_access_token(&token, SECRET),
            Err(TokenError::Invalid)
        ));
    }
}
