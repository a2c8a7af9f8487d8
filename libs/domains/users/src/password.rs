use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
};

use crate::error::{UserError, UserResult};

/// Outcome of checking a raw password against a stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordMatch {
    Matched,
    Mismatched,
}

impl PasswordMatch {
    pub fn is_match(self) -> bool {
        self == PasswordMatch::Matched
    }
}

/// Hashes and verifies passwords; the service never sees the algorithm.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> UserResult<String>;

    /// A stored hash that cannot be parsed is an error, not a mismatch.
    fn verify(&self, hash: &str, raw: &str) -> UserResult<PasswordMatch>;
}

/// Salted argon2id, producing PHC strings
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, raw: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify(&self, hash: &str, raw: &str) -> UserResult<PasswordMatch> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        match Argon2::default().verify_password(raw.as_bytes(), &parsed) {
            Ok(()) => Ok(PasswordMatch::Matched),
            Err(password_hash::Error::Password) => Ok(PasswordMatch::Mismatched),
            Err(e) => Err(UserError::PasswordHash(e.to_string())),
        }
    }
}
