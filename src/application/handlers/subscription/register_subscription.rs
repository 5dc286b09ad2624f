//! RegisterSubscriptionHandler - Command handler for recording a plan purchase.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::billing::Plan;
use crate::domain::foundation::{AccountId, Timestamp};
use crate::domain::subscription::Subscription;
use crate::ports::{AccountRepository, SubscriptionRepository};

/// Command to start a subscription for an existing account.
#[derive(Debug, Clone)]
pub struct RegisterSubscriptionCommand {
    pub plan: String,
    pub account_id: String,
}

/// Handler for subscription registration.
///
/// The subscription is recorded as active immediately. It does not touch
/// the account's activation flag, which only an approved payment sets.
pub struct RegisterSubscriptionHandler {
    accounts: Arc<dyn AccountRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl RegisterSubscriptionHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            accounts,
            subscriptions,
        }
    }

    pub async fn handle(&self, cmd: RegisterSubscriptionCommand) -> Result<Subscription, AccountError> {
        if cmd.plan.trim().is_empty() {
            return Err(AccountError::validation("plan", "is required"));
        }
        if cmd.account_id.trim().is_empty() {
            return Err(AccountError::validation("accountId", "is required"));
        }

        let plan = Plan::parse(&cmd.plan).ok_or_else(|| AccountError::invalid_plan(cmd.plan.trim()))?;
        let account_id: AccountId = cmd
            .account_id
            .parse()
            .map_err(|_| AccountError::validation("accountId", "must be a valid account id"))?;

        if self.accounts.find_by_id(&account_id).await?.is_none() {
            return Err(AccountError::not_found(account_id.to_string()));
        }

        let subscription = Subscription::start(account_id, plan, Timestamp::now());
        self.subscriptions.create(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.id,
            account_id = %account_id,
            plan = %plan,
            "Subscription registered"
        );

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAccountRepository, InMemorySubscriptionRepository};
    use crate::domain::account::{Account, Email, NationalId, PasswordHash, Username};
    use crate::domain::subscription::SubscriptionStatus;

    // ════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════

    async fn setup() -> (
        RegisterSubscriptionHandler,
        InMemorySubscriptionRepository,
        AccountId,
    ) {
        let accounts = InMemoryAccountRepository::new();
        let account = Account::register(
            Username::new("joao").unwrap(),
            Email::new("joao@x.com").unwrap(),
            NationalId::new("52998224725").unwrap(),
            PasswordHash::from_phc("$argon2id$stub"),
        );
        accounts.create(&account).await.unwrap();

        let subscriptions = InMemorySubscriptionRepository::new();
        let handler = RegisterSubscriptionHandler::new(
            Arc::new(accounts),
            Arc::new(subscriptions.clone()),
        );
        (handler, subscriptions, account.id())
    }

    fn cmd(plan: &str, account_id: &str) -> RegisterSubscriptionCommand {
        RegisterSubscriptionCommand {
            plan: plan.to_string(),
            account_id: account_id.to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn registers_active_subscription() {
        let (handler, store, account_id) = setup().await;

        let sub = handler
            .handle(cmd("premium", &account_id.to_string()))
            .await
            .unwrap();

        assert_eq!(sub.plan, Plan::Premium);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.start_date.is_before(&sub.end_date));
        assert!(store.find_by_id(&sub.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_plan_is_rejected() {
        let (handler, _, account_id) = setup().await;
        let err = handler.handle(cmd(" ", &account_id.to_string())).await.unwrap_err();
        assert!(matches!(err, AccountError::ValidationFailed { ref field, .. } if field == "plan"));
    }

    #[tokio::test]
    async fn missing_account_id_is_rejected() {
        let (handler, _, _) = setup().await;
        let err = handler.handle(cmd("basico", "")).await.unwrap_err();
        assert!(matches!(err, AccountError::ValidationFailed { ref field, .. } if field == "accountId"));
    }

    #[tokio::test]
    async fn light_plan_runs_for_one_month() {
        let (handler, _, account_id) = setup().await;

        let sub = handler
            .handle(cmd("Light", &account_id.to_string()))
            .await
            .unwrap();

        assert_eq!(sub.plan, Plan::Light);
        assert_eq!(sub.start_date.add_calendar_months(1), sub.end_date);
    }

    #[tokio::test]
    async fn unknown_plan_is_rejected() {
        let (handler, _, account_id) = setup().await;
        let err = handler.handle(cmd("gold", &account_id.to_string())).await.unwrap_err();
        assert_eq!(err, AccountError::invalid_plan("gold"));
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let (handler, _, _) = setup().await;
        let err = handler
            .handle(cmd("basico", &AccountId::new().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_account_id_is_a_validation_error() {
        let (handler, _, _) = setup().await;
        let err = handler.handle(cmd("basico", "abc")).await.unwrap_err();
        assert!(matches!(err, AccountError::ValidationFailed { .. }));
    }
}
