//! CreateCheckoutHandler - Builds a checkout preference for an account.
//!
//! Pure translator: reads the account, submits a preference to the gateway
//! and returns the checkout URL. Nothing is persisted.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::billing::{CheckoutKind, CheckoutPreference, CheckoutSettings, Plan};
use crate::domain::foundation::AccountId;
use crate::ports::{AccountRepository, GatewayError, GatewayErrorCode, PaymentGateway};

/// Command to start checkout for an account.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub account_id: String,
    pub plan: String,
    pub kind: CheckoutKind,
}

/// Checkout details handed back to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCheckoutResult {
    pub preference_id: String,
    /// Sandbox URL when the gateway returned one, otherwise production.
    pub checkout_url: String,
    pub plan: Plan,
    pub amount: f64,
    /// Echoed for the existing-account flow only.
    pub username: Option<String>,
}

pub struct CreateCheckoutHandler {
    accounts: Arc<dyn AccountRepository>,
    gateway: Arc<dyn PaymentGateway>,
    settings: CheckoutSettings,
}

impl CreateCheckoutHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        gateway: Arc<dyn PaymentGateway>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            accounts,
            gateway,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, AccountError> {
        // 1. Resolve plan and account
        let plan = Plan::parse_purchasable(&cmd.plan)
            .ok_or_else(|| AccountError::invalid_plan(cmd.plan.trim()))?;

        let raw_id = cmd.account_id.trim();
        if raw_id.is_empty() {
            return Err(AccountError::validation("accountId", "is required"));
        }
        let account_id: AccountId = raw_id
            .parse()
            .map_err(|_| AccountError::validation("accountId", "must be a valid account id"))?;

        let account = self
            .accounts
            .find_by_id(&account_id)
            .await?
            .ok_or_else(|| AccountError::not_found(account_id.to_string()))?;

        // 2. Build and submit the preference
        let preference =
            CheckoutPreference::for_account(account.id(), plan, cmd.kind, &self.settings)
                .ok_or_else(|| AccountError::invalid_plan(plan.as_str()))?;
        let amount = preference.total_amount();

        let created = self
            .gateway
            .create_preference(&preference)
            .await
            .map_err(gateway_failure)?;

        let checkout_url = created
            .checkout_url()
            .ok_or(AccountError::CheckoutUrlMissing)?
            .to_string();

        tracing::info!(
            account_id = %account.id(),
            plan = %plan,
            preference_id = %created.id,
            "Checkout preference ready"
        );

        Ok(CreateCheckoutResult {
            preference_id: created.id,
            checkout_url,
            plan,
            amount,
            username: match cmd.kind {
                CheckoutKind::ExistingAccount => Some(account.username().to_string()),
                CheckoutKind::NewSignup => None,
            },
        })
    }
}

/// Maps a gateway failure to the caller-facing error.
pub(crate) fn gateway_failure(err: GatewayError) -> AccountError {
    tracing::error!(code = %err.code, error = %err.message, "Payment gateway call failed");
    match err.code {
        GatewayErrorCode::Configuration => AccountError::configuration(err.message),
        _ => AccountError::gateway(err.to_string()),
    }
}
