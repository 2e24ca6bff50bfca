//! Credential handling.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - The registration password policy

mod password;

pub use password::{PasswordError, hash_password, verify_password};

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Returns true if a password satisfies the registration policy.
///
/// This is a caller-side precondition: `hash_password` itself accepts any
/// input, the registration route rejects short passwords before hashing.
#[must_use]
pub fn password_meets_policy(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("secret", true)]
    #[case("longer-password", true)]
    #[case("12345", false)]
    #[case("", false)]
    fn test_password_policy(#[case] password: &str, #[case] accepted: bool) {
        assert_eq!(password_meets_policy(password), accepted);
    }

    #[test]
    fn test_policy_counts_characters_not_bytes() {
        // Six multi-byte characters must pass.
        assert!(password_meets_policy("ññññññ"));
    }
}
