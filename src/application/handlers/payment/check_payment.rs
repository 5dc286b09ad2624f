//! CheckPaymentHandler - Read-only payment status lookup.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::billing::GatewayPayment;
use crate::ports::PaymentGateway;

use super::create_checkout::gateway_failure;

/// Fetches a payment from the gateway. Never activates anything.
pub struct CheckPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckPaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, payment_id: &str) -> Result<GatewayPayment, AccountError> {
        let payment_id = payment_id.trim();
        if payment_id.is_empty() {
            return Err(AccountError::validation("paymentId", "is required"));
        }

        self.gateway
            .get_payment(payment_id)
            .await
            .map_err(gateway_failure)
    }
}
