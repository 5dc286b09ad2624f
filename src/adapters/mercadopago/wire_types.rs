//! Mercado Pago REST payloads.
//!
//! Request and response shapes as the gateway sends them, with conversions
//! into the billing domain types. Gateway ids arrive as JSON numbers or
//! strings depending on the endpoint; both are accepted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::billing::{
    CheckoutPreference, CreatedPreference, GatewayPayment, MerchantOrder, OrderPayment,
    PaymentStatus, RedirectUrls,
};

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Preferences
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub back_urls: RedirectUrls,
    pub auto_return: String,
    pub external_reference: String,
    pub notification_url: String,
    pub binary_mode: bool,
    pub statement_descriptor: String,
    pub payment_methods: PaymentMethods,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub currency_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethods {
    pub excluded_payment_types: Vec<ExcludedType>,
    pub installments: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExcludedType {
    pub id: String,
}

impl From<&CheckoutPreference> for PreferenceRequest {
    fn from(pref: &CheckoutPreference) -> Self {
        Self {
            items: pref
                .items
                .iter()
                .map(|item| PreferenceItem {
                    id: item.id.clone(),
                    title: item.title.clone(),
                    description: item.description.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    currency_id: item.currency_id.clone(),
                })
                .collect(),
            back_urls: pref.redirect_urls.clone(),
            auto_return: pref.auto_return.clone(),
            external_reference: pref.external_reference.clone(),
            notification_url: pref.notification_url.clone(),
            binary_mode: pref.binary_mode,
            statement_descriptor: pref.statement_descriptor.clone(),
            payment_methods: PaymentMethods {
                excluded_payment_types: pref
                    .excluded_payment_types
                    .iter()
                    .map(|id| ExcludedType { id: id.clone() })
                    .collect(),
                installments: pref.installments,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceResponse {
    #[serde(deserialize_with = "gateway_id")]
    pub id: String,
    #[serde(default)]
    pub init_point: Option<String>,
    #[serde(default)]
    pub sandbox_init_point: Option<String>,
}

impl From<PreferenceResponse> for CreatedPreference {
    fn from(resp: PreferenceResponse) -> Self {
        Self {
            id: resp.id,
            init_point: resp.init_point,
            sandbox_init_point: resp.sandbox_init_point,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentResponse {
    #[serde(deserialize_with = "gateway_id")]
    pub id: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub status_detail: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub transaction_amount: Option<f64>,
}

impl From<PaymentResponse> for GatewayPayment {
    fn from(resp: PaymentResponse) -> Self {
        Self {
            id: resp.id,
            status: resp.status,
            status_detail: resp.status_detail,
            external_reference: resp.external_reference,
            transaction_amount: resp.transaction_amount,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Merchant Orders
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct MerchantOrderResponse {
    #[serde(deserialize_with = "gateway_id")]
    pub id: String,
    #[serde(default)]
    pub order_status: Option<String>,
    /// Older API versions only report `status`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub payments: Vec<OrderPaymentResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderPaymentResponse {
    #[serde(deserialize_with = "gateway_id")]
    pub id: String,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
}

impl From<MerchantOrderResponse> for MerchantOrder {
    fn from(resp: MerchantOrderResponse) -> Self {
        Self {
            id: resp.id,
            order_status: resp.order_status.or(resp.status).unwrap_or_default(),
            paid_amount: resp.paid_amount.unwrap_or(0.0),
            total_amount: resp.total_amount.unwrap_or(0.0),
            payments: resp
                .payments
                .into_iter()
                .map(|p| OrderPayment {
                    id: p.id,
                    status: p.status,
                })
                .collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

fn gateway_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
