//! CancelSubscriptionHandler - Command handler for cancelling a subscription.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::foundation::{SubscriptionId, Timestamp};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionRepository;

/// Cancels an active subscription.
///
/// A subscription that already ran past its end date is expired first and
/// then refuses cancellation.
pub struct CancelSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl CancelSubscriptionHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(&self, subscription_id: &str) -> Result<Subscription, AccountError> {
        let id: SubscriptionId = subscription_id
            .parse()
            .map_err(|_| AccountError::validation("subscriptionId", "must be a valid id"))?;

        let mut subscription = self
            .subscriptions
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AccountError::SubscriptionNotFound(id.to_string()))?;

        if subscription.expire_if_due(Timestamp::now()) {
            self.subscriptions.update(&subscription).await?;
        }

        subscription.cancel()?;
        self.subscriptions.update(&subscription).await?;

        tracing::info!(
            subscription_id = %id,
            account_id = %subscription.account_id,
            "Subscription cancelled"
        );

        Ok(subscription)
    }
}
