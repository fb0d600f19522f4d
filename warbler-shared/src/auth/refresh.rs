/// Refresh token value generation
///
/// Refresh tokens are opaque: unlike access tokens they carry no claims
/// and mean nothing until looked up in the database. The value only has
/// to be unguessable, so it is 32 bytes (256 bits) straight from the OS
/// CSPRNG, hex-encoded for transport and storage.
///
/// Persistence, expiry, and revocation live in
/// [`crate::models::refresh_token`]; this module only mints the value.

use rand::{rngs::OsRng, RngCore};

/// Entropy of a refresh token in bytes
const TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token string
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// Generates a fresh opaque refresh token value
///
/// Collisions are possible in principle; the store treats an insert
/// conflict as a signal to call this again, not to overwrite.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_hex_chars() {
        let token = generate_refresh_token();

        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();
        assert_ne!(a, b);
    }
}
