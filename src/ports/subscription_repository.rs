//! Subscription repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError, SubscriptionId};
use crate::domain::subscription::Subscription;

/// Persistence port for subscription records.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Replaces the stored status of an existing subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Subscriptions of one account, newest first.
    async fn list_by_account(&self, account_id: &AccountId)
        -> Result<Vec<Subscription>, DomainError>;
}
