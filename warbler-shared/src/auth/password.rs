/// Password hashing using Argon2id
///
/// Credentials are hashed with Argon2id, a memory-hard algorithm that
/// resists GPU and ASIC cracking. The produced PHC string embeds the
/// algorithm, cost parameters, and a per-call random salt, so nothing
/// beyond the string itself is needed to verify later.
///
/// # Parameters
///
/// - **Memory**: 64 MiB (65536 KiB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Salt**: 16 random bytes from the OS RNG
/// - **Output**: 32-byte hash
///
/// Lowering these below the defaults makes offline cracking of a leaked
/// hash table practical; they are compile-time constants on purpose.
///
/// # Example
///
/// ```
/// use warbler_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct horse battery staple")?;
/// assert!(verify_password("correct horse battery staple", &hash)?);
/// assert!(!verify_password("tr0ub4dor&3", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Memory cost in KiB (64 MiB working set)
const M_COST_KIB: u32 = 65536;

/// Number of passes over memory
const T_COST: u32 = 3;

/// Degree of parallelism
const P_COST: u32 = 4;

/// Length of the derived hash in bytes
const OUTPUT_LEN: usize = 32;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to derive a hash from the password
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// The stored hash string could not be parsed
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    /// Verification failed for a reason other than a wrong password
    #[error("failed to verify password: {0}")]
    Verify(String),
}

/// Hashes a password with Argon2id and a fresh random salt
///
/// Two calls with the same password produce different strings (the salt
/// differs) and both verify.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] only when the OS RNG or the hasher
/// itself fails; well-formed input never errors.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(M_COST_KIB)
        .t_cost(T_COST)
        .p_cost(P_COST)
        .output_len(OUTPUT_LEN)
        .build()
        .map_err(|e| PasswordError::Hash(format!("invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(format!("hash derivation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string
///
/// The cost parameters and salt embedded in the hash are used, so hashes
/// produced under older parameter choices keep verifying. The underlying
/// comparison is constant-time; timing does not depend on where a
/// mismatching password diverges.
///
/// # Returns
///
/// `Ok(true)` on match, `Ok(false)` on mismatch.
///
/// # Errors
///
/// Returns [`PasswordError::MalformedHash`] when the stored string is not
/// a parseable PHC hash, and [`PasswordError::Verify`] for any other
/// internal failure. A wrong password is never an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PasswordError::MalformedHash(format!("{}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(format!("{}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_embeds_algorithm_and_params() {
        let hash = hash_password("swordfish").expect("hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hash1 = hash_password("swordfish").expect("hash should succeed");
        let hash2 = hash_password("swordfish").expect("hash should succeed");

        // Fresh salt per call
        assert_ne!(hash1, hash2);
        assert!(verify_password("swordfish", &hash1).unwrap());
        assert!(verify_password("swordfish", &hash2).unwrap());
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hash_password("swordfish").expect("hash should succeed");
        assert!(verify_password("swordfish", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password_is_false_not_error() {
        let hash = hash_password("swordfish").expect("hash should succeed");

        let result = verify_password("sawfish", &hash).expect("verify should not error");
        assert!(!result);
    }

    #[test]
    fn test_verify_empty_password() {
        let hash = hash_password("swordfish").expect("hash should succeed");
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash_is_error() {
        assert!(matches!(
            verify_password("swordfish", "not-a-phc-string"),
            Err(PasswordError::MalformedHash(_))
        ));
        assert!(verify_password("swordfish", "$argon2id$broken").is_err());
    }

    #[test]
    fn test_roundtrip_unusual_passwords() {
        let passwords = [
            "with spaces and punctuation!?",
            "unicode-contraseña-密码",
            "x",
            "a-rather-long-password-of-the-kind-password-managers-generate-1234567890",
        ];

        for password in passwords {
            let hash = hash_password(password).expect("hash should succeed");
            assert!(
                verify_password(password, &hash).unwrap(),
                "password {:?} should verify",
                password
            );
        }
    }
}
