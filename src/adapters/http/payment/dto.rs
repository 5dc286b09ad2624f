//! Request and response bodies for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::CreateCheckoutResult;
use crate::domain::billing::{GatewayPayment, PaymentStatus, Plan};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePreferenceRequest {
    #[serde(alias = "gestorId", alias = "account_id")]
    pub account_id: String,
    #[serde(alias = "plano")]
    pub plan: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckPaymentRequest {
    #[serde(alias = "payment_id")]
    pub payment_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Checkout body. Both URL fields carry the chosen checkout URL.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub id: String,
    pub init_point: String,
    pub sandbox_init_point: String,
    pub details: CheckoutDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutDetails {
    pub preference_id: String,
    pub plan: Plan,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gestor: Option<String>,
}

impl From<CreateCheckoutResult> for CheckoutResponse {
    fn from(result: CreateCheckoutResult) -> Self {
        Self {
            success: true,
            id: result.preference_id.clone(),
            init_point: result.checkout_url.clone(),
            sandbox_init_point: result.checkout_url,
            details: CheckoutDetails {
                preference_id: result.preference_id,
                plan: result.plan,
                amount: result.amount,
                gestor: result.username,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPaymentResponse {
    pub id: String,
    pub status: PaymentStatus,
    pub status_detail: Option<String>,
    pub external_reference: Option<String>,
    pub transaction_amount: Option<f64>,
    pub approved: bool,
}

impl From<GatewayPayment> for CheckPaymentResponse {
    fn from(payment: GatewayPayment) -> Self {
        Self {
            approved: payment.status.is_approved(),
            id: payment.id,
            status: payment.status,
            status_detail: payment.status_detail,
            external_reference: payment.external_reference,
            transaction_amount: payment.transaction_amount,
        }
    }
}

/// Failure body for gateway errors, naming the step that failed.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayFailureResponse {
    pub success: bool,
    pub error: String,
    pub details: String,
    pub step: &'static str,
}
