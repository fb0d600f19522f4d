/// Partner API key comparison
///
/// The billing partner authenticates its webhook calls with a single
/// pre-shared key (`Authorization: ApiKey <key>`). The key is configured
/// at startup and compared here by SHA-256 digest equality, so the
/// comparison time does not depend on how many leading characters of a
/// guessed key are correct.

use sha2::{Digest, Sha256};

/// Checks a presented API key against the configured one
///
/// # Example
///
/// ```
/// use warbler_shared::auth::api_key::verify_api_key;
///
/// assert!(verify_api_key("f271c81ff7084fac", "f271c81ff7084fac"));
/// assert!(!verify_api_key("f271c81ff7084fad", "f271c81ff7084fac"));
/// ```
pub fn verify_api_key(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}
