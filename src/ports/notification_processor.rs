//! Notification processing port.
//!
//! Separates the queue and retry machinery from the activation logic so
//! each can be exercised alone.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::account::ActivationOutcome;
use crate::domain::billing::{NotificationPayload, PaymentStatus};
use crate::domain::foundation::DomainError;

use super::GatewayError;

/// Processes one normalized notification to completion.
#[async_trait]
pub trait NotificationProcessor: Send + Sync {
    async fn process(
        &self,
        notification: &NotificationPayload,
    ) -> Result<NotificationOutcome, ProcessingError>;
}

/// What a single payment resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Payment exists but is not approved; nothing changed.
    NotApproved {
        payment_id: String,
        status: PaymentStatus,
    },

    /// Approved payment without an account reference; nothing changed.
    MissingExternalReference { payment_id: String },

    /// Approved payment applied to an account.
    Applied {
        payment_id: String,
        account_reference: String,
        activation: ActivationOutcome,
    },
}

impl PaymentOutcome {
    /// True while the gateway may still approve this payment.
    pub fn awaiting_approval(&self) -> bool {
        matches!(self, PaymentOutcome::NotApproved { status, .. } if status.may_still_approve())
    }
}

/// Result of processing one notification.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOutcome {
    /// Unrecognized notification kind; dropped.
    Discarded { kind: Option<String> },

    /// Merchant order is not fully paid; no payment was examined.
    OrderNotPaid { order_id: String },

    /// One entry per examined payment.
    Payments(Vec<PaymentOutcome>),
}

impl NotificationOutcome {
    /// Whether a later re-check could still change the result.
    pub fn awaiting_approval(&self) -> bool {
        match self {
            NotificationOutcome::Payments(outcomes) => {
                outcomes.iter().any(PaymentOutcome::awaiting_approval)
            }
            _ => false,
        }
    }

    /// Number of accounts freshly activated by this notification.
    pub fn activations(&self) -> usize {
        match self {
            NotificationOutcome::Payments(outcomes) => outcomes
                .iter()
                .filter(|o| {
                    matches!(
                        o,
                        PaymentOutcome::Applied {
                            activation: ActivationOutcome::Activated,
                            ..
                        }
                    )
                })
                .count(),
            _ => 0,
        }
    }
}

/// Failures while processing a notification.
#[derive(Debug, Clone, Error)]
pub enum ProcessingError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("account store error: {0}")]
    Store(#[from] DomainError),
}

impl ProcessingError {
    /// Only transient gateway failures are retried.
    pub fn is_transient(&self) -> bool {
        match self {
            ProcessingError::Gateway(err) => err.is_transient(),
            ProcessingError::Store(_) => false,
        }
    }
}
