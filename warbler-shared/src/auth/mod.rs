/// Authentication primitives for Warbler
///
/// This module contains the security-sensitive core of the service:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: Signed access token issuance and validation
/// - [`refresh`]: Opaque refresh token value generation
/// - [`extract`]: Header parsing for bearer tokens and API keys
/// - [`api_key`]: Partner API key comparison
/// - [`middleware`]: Request authorization gate for Axum routers
///
/// # Security Properties
///
/// - Passwords are hashed with Argon2id (64 MiB memory, 3 iterations)
///   and never stored or logged in plaintext
/// - Access tokens are HS256-signed, short-lived, and carry a fixed
///   issuer tag so tokens of other classes are never accepted
/// - Refresh tokens are 256-bit random values validated against
///   server-side expiry and revocation state on every use
/// - Validation failures are collapsed into uniform errors so callers
///   cannot learn which internal check rejected them

pub mod api_key;
pub mod extract;
pub mod middleware;
pub mod password;
pub mod refresh;
pub mod token;
