//! Account repository port.

use async_trait::async_trait;

use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, DomainError, Timestamp};

/// Persistence port for account holders.
///
/// Implementations enforce uniqueness of username, email and national id
/// on their normalized forms.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` with a `field` detail naming the violated unique
    ///   field or constraint
    /// - `DatabaseError` on persistence failure
    async fn create(&self, account: &Account) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_national_id(&self, national_id: &str)
        -> Result<Option<Account>, DomainError>;

    /// Lists every account, oldest first.
    async fn list(&self) -> Result<Vec<Account>, DomainError>;

    /// Atomically activates the account only if it is still inactive.
    ///
    /// Sets the active flag, approved payment status, activation time and
    /// last payment time in one conditional write and returns the number of
    /// rows modified: 1 for a fresh activation, 0 when the account is
    /// missing or already active.
    async fn activate_if_inactive(&self, id: &AccountId, at: Timestamp)
        -> Result<u64, DomainError>;
}
