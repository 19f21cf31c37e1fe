use crate::{AuthError, Result as AuthErrorResult};

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;

/// Hashes and verifies account passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password into a self-describing (PHC) string.
    fn hash(&self, password: &str) -> AuthErrorResult<String>;

    /// `Ok(false)` for a wrong password; `Err` only for an unreadable hash.
    fn verify(&self, password: &str, hash: &str) -> AuthErrorResult<bool>;
}

/// Argon2id with the crate's default parameters and a random 16-byte salt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> AuthErrorResult<String> {
        let mut salt_bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut salt_bytes);

        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::password_hash(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::password_hash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> AuthErrorResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::password_hash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
