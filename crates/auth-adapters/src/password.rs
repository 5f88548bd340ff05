//! Argon2id password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use domains::{DomainError, PasswordHasher, Result};

/// Produces PHC strings (`$argon2id$v=19$...`) with a random per-password salt.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::Internal(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies if a provided password matches a stored Argon2 hash.
    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(_) => return false,
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse battery").unwrap();

        assert_ne!(hash, "correct horse battery");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse battery", &hash));
        assert!(!hasher.verify("wrong horse", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = Argon2PasswordHasher::new();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!Argon2PasswordHasher::new().verify("anything", "not-a-phc-string"));
    }
}
