//! Password hashing using Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// One-way password hashing seam.
///
/// `verify` deliberately collapses "bad hash format" and "wrong password"
/// into `false`; callers only ever see match or mismatch.
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a plaintext password into a storable string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a candidate password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2-based password hasher producing PHC strings with random salts.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();

        let hash = hasher.hash("correct horse battery").unwrap();

        assert!(hasher.verify("correct horse battery", &hash));
        assert!(!hasher.verify("wrong password", &hash));
    }

    #[test]
    fn test_salts_make_hashes_unique() {
        let hasher = Argon2Hasher::new();

        let hash1 = hasher.hash("same password").unwrap();
        let hash2 = hasher.hash("same password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify("same password", &hash1));
        assert!(hasher.verify("same password", &hash2));
    }

    #[test]
    fn test_verify_garbage_hash_is_mismatch() {
        let hasher = Argon2Hasher::new();

        assert!(!hasher.verify("password", "not-a-phc-string"));
        assert!(!hasher.verify("password", ""));
    }
}
