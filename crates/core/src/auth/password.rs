//! Password hashing with Argon2id.
//!
//! Every hash uses a fresh random salt, and verification delegates the
//! comparison to the argon2 primitive so it is constant-time with respect to
//! the stored hash. Plaintext passwords are never persisted anywhere.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// Failed to verify password.
    #[error("failed to verify password: {0}")]
    Verify(String),

    /// Stored hash is not a valid PHC string.
    #[error("malformed password hash")]
    MalformedHash,
}

/// Hashes a password using Argon2id with a per-call random salt.
///
/// # Errors
///
/// Returns `PasswordError::Hash` if hashing fails.
///
/// # Example
///
/// ```
/// use vendia_core::auth::hash_password;
///
/// let hash = hash_password("correct horse battery").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verifies a password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch; an `Err` means the stored hash could
/// not be used at all (malformed, or an unexpected argon2 failure).
///
/// # Errors
///
/// Returns `PasswordError::MalformedHash` if the hash is not a PHC string.
/// Returns `PasswordError::Verify` on unexpected verification failures.
///
/// # Example
///
/// ```
/// use vendia_core::auth::{hash_password, verify_password};
///
/// let hash = hash_password("swordfish").unwrap();
/// assert!(verify_password("swordfish", &hash).unwrap());
/// assert!(!verify_password("sword", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_encoded() {
        let hash = hash_password("some-password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "some-password");
    }

    #[test]
    fn test_round_trip_accepts_original() {
        let hash = hash_password("open sesame").unwrap();
        assert!(verify_password("open sesame", &hash).unwrap());
    }

    #[test]
    fn test_suffix_variant_is_rejected() {
        // Spec property: verify(hash(p), p + "x") is false.
        let hash = hash_password("open sesame").unwrap();
        assert!(!verify_password("open sesamex", &hash).unwrap());
    }

    #[test]
    fn test_salt_makes_hashes_unique() {
        let first = hash_password("same-input").unwrap();
        let second = hash_password("same-input").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash() {
        let result = verify_password("whatever", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedHash)));
    }
}
