//! Checkout preference construction.
//!
//! A preference is the gateway-side description of what is being paid for.
//! The account id travels as the external reference, which is the only
//! link between a later payment and the local account.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AccountId;

use super::Plan;

/// Currency every plan is priced in.
pub const CURRENCY_BRL: &str = "BRL";

/// Browser redirect targets after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// Static settings shared by every preference this system creates.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub redirect_urls: RedirectUrls,
    pub notification_url: String,
    pub statement_descriptor: String,
}

/// Whether the checkout starts a fresh signup or resumes an unpaid account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    NewSignup,
    ExistingAccount,
}

/// Single line item of a preference.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub currency_id: String,
}

/// Checkout preference submitted to the payment gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPreference {
    pub items: Vec<CheckoutItem>,
    pub redirect_urls: RedirectUrls,
    pub auto_return: String,
    pub external_reference: String,
    pub notification_url: String,
    pub binary_mode: bool,
    pub statement_descriptor: String,
    pub excluded_payment_types: Vec<String>,
    pub installments: u32,
}

impl CheckoutPreference {
    /// Builds the one-item preference for `account_id` buying `plan`.
    /// `None` when the plan has no checkout price.
    pub fn for_account(
        account_id: AccountId,
        plan: Plan,
        kind: CheckoutKind,
        settings: &CheckoutSettings,
    ) -> Option<Self> {
        let unit_price = plan.unit_price()?;
        let (item_id, title, description) = match kind {
            CheckoutKind::NewSignup => (
                format!("plano-{}", plan),
                format!("Plano {} - PremiX", plan),
                format!("Assinatura do plano {} - PremiX", plan),
            ),
            CheckoutKind::ExistingAccount => (
                format!("plano-{}-existente", plan),
                format!("Plano {} - PremiX (Conta Existente)", plan),
                format!("Assinatura do plano {} para conta existente - PremiX", plan),
            ),
        };

        Some(Self {
            items: vec![CheckoutItem {
                id: item_id,
                title,
                description,
                unit_price,
                quantity: 1,
                currency_id: CURRENCY_BRL.to_string(),
            }],
            redirect_urls: settings.redirect_urls.clone(),
            auto_return: "approved".to_string(),
            external_reference: account_id.to_string(),
            notification_url: settings.notification_url.clone(),
            binary_mode: true,
            statement_descriptor: settings.statement_descriptor.clone(),
            // Cash voucher and ATM payments settle days later.
            excluded_payment_types: vec!["ticket".to_string(), "atm".to_string()],
            installments: 1,
        })
    }

    /// Sum of all line items.
    pub fn total_amount(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.unit_price * f64::from(item.quantity))
            .sum()
    }
}

/// Preference as acknowledged by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPreference {
    pub id: String,
    pub init_point: Option<String>,
    pub sandbox_init_point: Option<String>,
}

impl CreatedPreference {
    /// Sandbox URL when present, otherwise the production URL.
    pub fn checkout_url(&self) -> Option<&str> {
        non_blank(self.sandbox_init_point.as_deref()).or(non_blank(self.init_point.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
