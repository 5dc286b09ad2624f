//! ListSubscriptionsHandler - Query handler for an account's subscriptions.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::foundation::{AccountId, Timestamp};
use crate::domain::subscription::Subscription;
use crate::ports::{AccountRepository, SubscriptionRepository};

/// Lists the subscriptions of one account, newest first.
///
/// Subscriptions past their end date are marked expired on read.
pub struct ListSubscriptionsHandler {
    accounts: Arc<dyn AccountRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl ListSubscriptionsHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            accounts,
            subscriptions,
        }
    }

    pub async fn handle(&self, account_id: &str) -> Result<Vec<Subscription>, AccountError> {
        let account_id: AccountId = account_id
            .parse()
            .map_err(|_| AccountError::validation("accountId", "must be a valid account id"))?;

        if self.accounts.find_by_id(&account_id).await?.is_none() {
            return Err(AccountError::not_found(account_id.to_string()));
        }

        let now = Timestamp::now();
        let mut subscriptions = self.subscriptions.list_by_account(&account_id).await?;
        for subscription in subscriptions.iter_mut() {
            if subscription.expire_if_due(now) {
                self.subscriptions.update(subscription).await?;
                tracing::info!(subscription_id = %subscription.id, "Subscription expired");
            }
        }

        Ok(subscriptions)
    }
}
