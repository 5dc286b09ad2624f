//! In-memory account repository.
//!
//! Mirrors the PostgreSQL adapter's semantics (unique fields, conditional
//! activation) under a single write lock. Used by tests and by local runs
//! without a database.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, ActivationOutcome};
use crate::domain::foundation::{AccountId, DomainError, Timestamp};
use crate::ports::AccountRepository;

/// Account store backed by a vector, insertion-ordered.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.username() == account.username()) {
            return Err(DomainError::duplicate_key("username"));
        }
        if accounts.iter().any(|a| a.email() == account.email()) {
            return Err(DomainError::duplicate_key("email"));
        }
        if accounts.iter().any(|a| a.national_id() == account.national_id()) {
            return Err(DomainError::duplicate_key("nationalId"));
        }

        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id() == *id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.username().as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.email().as_str() == email).cloned())
    }

    async fn find_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.national_id().as_str() == national_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        Ok(self.accounts.read().await.clone())
    }

    async fn activate_if_inactive(
        &self,
        id: &AccountId,
        at: Timestamp,
    ) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        let modified = match accounts.iter_mut().find(|a| a.id() == *id) {
            Some(account) => match account.activate(at) {
                ActivationOutcome::Activated => 1,
                _ => 0,
            },
            None => 0,
        };
        Ok(modified)
    }
}
