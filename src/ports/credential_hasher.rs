//! Credential hashing port.

use crate::domain::account::PasswordHash;
use crate::domain::foundation::DomainError;

/// One-way hashing of account credentials.
///
/// Synchronous and CPU-bound; callers run it off the async executor.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<PasswordHash, DomainError>;

    /// Returns `Ok(false)` on mismatch and `Err` for a malformed stored hash.
    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, DomainError>;
}
