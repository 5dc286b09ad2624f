//! ActivationEngine - Turns one payment notification into at most one
//! activation per referenced account.
//!
//! The notification body is never trusted: every payment is re-fetched from
//! the gateway and only the status `approved` activates. The payment's
//! external reference names the account. Activation goes through the store's
//! conditional write, so duplicate and concurrent deliveries are harmless.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::ActivationOutcome;
use crate::domain::billing::{GatewayPayment, NotificationPayload};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::{
    AccountRepository, NotificationOutcome, NotificationProcessor, PaymentGateway,
    PaymentOutcome, ProcessingError,
};

pub struct ActivationEngine {
    accounts: Arc<dyn AccountRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl ActivationEngine {
    pub fn new(accounts: Arc<dyn AccountRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { accounts, gateway }
    }

    /// Fetches one payment and applies it if approved.
    async fn process_payment(&self, payment_id: &str) -> Result<PaymentOutcome, ProcessingError> {
        let payment = self.gateway.get_payment(payment_id).await?;
        self.resolve_payment(payment).await
    }

    async fn resolve_payment(
        &self,
        payment: GatewayPayment,
    ) -> Result<PaymentOutcome, ProcessingError> {
        if !payment.status.is_approved() {
            tracing::info!(
                payment_id = %payment.id,
                status = %payment.status.as_str(),
                "Payment not approved, nothing to do"
            );
            return Ok(PaymentOutcome::NotApproved {
                payment_id: payment.id,
                status: payment.status,
            });
        }

        let Some(reference) = payment.account_reference().map(str::to_string) else {
            tracing::warn!(
                payment_id = %payment.id,
                "Approved payment has no external reference, skipping"
            );
            return Ok(PaymentOutcome::MissingExternalReference {
                payment_id: payment.id,
            });
        };

        let activation = self.activate(&reference).await?;
        Ok(PaymentOutcome::Applied {
            payment_id: payment.id,
            account_reference: reference,
            activation,
        })
    }

    async fn activate(&self, reference: &str) -> Result<ActivationOutcome, ProcessingError> {
        let Ok(account_id) = reference.parse::<AccountId>() else {
            tracing::warn!(reference = %reference, "External reference is not an account id");
            return Ok(ActivationOutcome::AccountNotFound);
        };

        let Some(account) = self.accounts.find_by_id(&account_id).await? else {
            tracing::warn!(account_id = %account_id, "Referenced account does not exist");
            return Ok(ActivationOutcome::AccountNotFound);
        };

        if account.is_active() {
            tracing::info!(account_id = %account_id, "Account already active");
            return Ok(ActivationOutcome::AlreadyActive);
        }

        let modified = self
            .accounts
            .activate_if_inactive(&account_id, Timestamp::now())
            .await?;

        if modified == 0 {
            tracing::info!(account_id = %account_id, "Account activated concurrently");
            return Ok(ActivationOutcome::AlreadyActive);
        }

        tracing::info!(account_id = %account_id, "Account activated");
        Ok(ActivationOutcome::Activated)
    }
}

#[async_trait]
impl NotificationProcessor for ActivationEngine {
    async fn process(
        &self,
        notification: &NotificationPayload,
    ) -> Result<NotificationOutcome, ProcessingError> {
        match notification {
            NotificationPayload::Unknown { kind, .. } => {
                tracing::info!(kind = ?kind, "Ignoring notification of unhandled kind");
                Ok(NotificationOutcome::Discarded { kind: kind.clone() })
            }

            NotificationPayload::Payment { id } => {
                let outcome = self.process_payment(id).await?;
                Ok(NotificationOutcome::Payments(vec![outcome]))
            }

            NotificationPayload::MerchantOrder { order_id } => {
                let order = self.gateway.get_merchant_order(order_id).await?;

                if !order.is_fully_paid() {
                    tracing::info!(
                        order_id = %order_id,
                        order_status = %order.order_status,
                        paid_amount = order.paid_amount,
                        total_amount = order.total_amount,
                        "Merchant order not fully paid"
                    );
                    return Ok(NotificationOutcome::OrderNotPaid {
                        order_id: order_id.clone(),
                    });
                }

                // Each listed payment is verified on its own.
                let mut outcomes = Vec::with_capacity(order.payments.len());
                for payment in &order.payments {
                    outcomes.push(self.process_payment(&payment.id).await?);
                }
                Ok(NotificationOutcome::Payments(outcomes))
            }
        }
    }
}
