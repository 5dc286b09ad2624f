//! Argon2id credential hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::domain::account::PasswordHash;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CredentialHasher;

/// Hashes credentials with Argon2id and a random salt per credential.
///
/// Output is a PHC string (`$argon2id$v=19$...`), so parameters and salt
/// travel with the hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<PasswordHash, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("hash error: {e}")))?;
        Ok(PasswordHash::from_phc(phc.to_string()))
    }

    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, DomainError> {
        let parsed = argon2::PasswordHash::new(hash.as_str()).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("invalid hash format: {e}"))
        })?;

        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::new(
                ErrorCode::InternalError,
                format!("verify error: {e}"),
            )),
        }
    }
}
