/// Credential extraction from request headers
///
/// Both credential schemes arrive in the `Authorization` header with a
/// distinguishing prefix:
///
/// - `Authorization: Bearer <token>` — access or refresh tokens
/// - `Authorization: ApiKey <key>` — partner webhook key
///
/// Extraction is purely mechanical: a missing header is an error, but a
/// present header is returned with the prefix stripped when found and
/// untouched otherwise. Whether the resulting string is a usable
/// credential is the validator's decision, not the extractor's.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use warbler_shared::auth::extract::bearer_token;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
/// assert_eq!(bearer_token(&headers).unwrap(), "abc123");
/// ```

use axum::http::{header, HeaderMap};

/// Bearer scheme prefix, including the separating space
const BEARER_PREFIX: &str = "Bearer ";

/// API key scheme prefix, including the separating space
const API_KEY_PREFIX: &str = "ApiKey ";

/// Error type for credential extraction
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// No `Authorization` header on the request
    #[error("missing authorization header")]
    MissingHeader,

    /// The header value is not valid visible ASCII
    #[error("malformed authorization header")]
    MalformedHeader,
}

/// Extracts a bearer token from the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Result<String, ExtractError> {
    scheme_token(headers, BEARER_PREFIX)
}

/// Extracts an API key from the `Authorization` header
pub fn api_key(headers: &HeaderMap) -> Result<String, ExtractError> {
    scheme_token(headers, API_KEY_PREFIX)
}

fn scheme_token(headers: &HeaderMap, prefix: &str) -> Result<String, ExtractError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ExtractError::MissingHeader)?
        .to_str()
        .map_err(|_| ExtractError::MalformedHeader)?;

    Ok(value.strip_prefix(prefix).unwrap_or(value).to_string())
}
