//! Mercado Pago configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::mercadopago::{MercadoPagoConfig, WebhookVerifier};
use crate::domain::billing::{CheckoutSettings, RedirectUrls};

/// Payment gateway credentials and checkout defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Mercado Pago access token. Sandbox tokens start with `TEST-`.
    #[serde(default)]
    pub access_token: Option<SecretString>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_merchant_order_base_url")]
    pub merchant_order_base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Where the gateway posts payment notifications
    #[serde(default = "default_notification_url")]
    pub notification_url: String,

    #[serde(default = "default_success_url")]
    pub success_url: String,

    #[serde(default = "default_failure_url")]
    pub failure_url: String,

    #[serde(default = "default_pending_url")]
    pub pending_url: String,

    #[serde(default = "default_statement_descriptor")]
    pub statement_descriptor: String,

    /// Webhook signing secret. Signatures are only checked when set.
    #[serde(default)]
    pub webhook_secret: Option<SecretString>,
}

impl PaymentConfig {
    pub fn has_access_token(&self) -> bool {
        self.access_token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().trim().is_empty())
    }

    pub fn is_sandbox(&self) -> bool {
        self.access_token
            .as_ref()
            .is_some_and(|token| token.expose_secret().starts_with("TEST-"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Static values stamped onto every checkout preference.
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            redirect_urls: RedirectUrls {
                success: self.success_url.clone(),
                failure: self.failure_url.clone(),
                pending: self.pending_url.clone(),
            },
            notification_url: self.notification_url.clone(),
            statement_descriptor: self.statement_descriptor.clone(),
        }
    }

    /// Gateway client configuration. A missing token yields an
    /// unconfigured client that refuses every call.
    pub fn gateway_config(&self) -> MercadoPagoConfig {
        let config = match &self.access_token {
            Some(token) => MercadoPagoConfig::new(token.expose_secret().clone()),
            None => MercadoPagoConfig::unconfigured(),
        };
        config
            .with_base_url(self.api_base_url.clone())
            .with_merchant_order_base_url(self.merchant_order_base_url.clone())
            .with_timeout(self.request_timeout())
    }

    pub fn webhook_verifier(&self) -> Option<WebhookVerifier> {
        self.webhook_secret
            .as_ref()
            .map(|secret| secret.expose_secret())
            .filter(|secret| !secret.trim().is_empty())
            .map(|secret| WebhookVerifier::new(secret.clone()))
    }

    /// `require_token` is set in production, where running without
    /// credentials is a deployment mistake.
    pub fn validate(&self, require_token: bool) -> Result<(), ValidationError> {
        if require_token && !self.has_access_token() {
            return Err(ValidationError::MissingRequired("PAYMENT__ACCESS_TOKEN"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout("payment.request_timeout_secs"));
        }

        let urls = [
            ("payment.api_base_url", &self.api_base_url),
            ("payment.merchant_order_base_url", &self.merchant_order_base_url),
            ("payment.notification_url", &self.notification_url),
            ("payment.success_url", &self.success_url),
            ("payment.failure_url", &self.failure_url),
            ("payment.pending_url", &self.pending_url),
        ];
        for (name, url) in urls {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl(name));
            }
        }

        if self.statement_descriptor.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STATEMENT_DESCRIPTOR"));
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: default_api_base_url(),
            merchant_order_base_url: default_merchant_order_base_url(),
            request_timeout_secs: default_request_timeout(),
            notification_url: default_notification_url(),
            success_url: default_success_url(),
            failure_url: default_failure_url(),
            pending_url: default_pending_url(),
            statement_descriptor: default_statement_descriptor(),
            webhook_secret: None,
        }
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty())
}

fn default_api_base_url() -> String {
    "https://api.mercadopago.com".to_string()
}

fn default_merchant_order_base_url() -> String {
    "https://api.mercadolibre.com".to_string()
}

fn default_request_timeout() -> u64 {
    5
}

fn default_notification_url() -> String {
    "https://premix-sitecode1.onrender.com/webhooks/mercadopago".to_string()
}

fn default_success_url() -> String {
    "https://premix-frontend.onrender.com/pages/success.html".to_string()
}

fn default_failure_url() -> String {
    "https://premix-frontend.onrender.com/pages/error.html".to_string()
}

fn default_pending_url() -> String {
    "https://premix-frontend.onrender.com/pages/pending.html".to_string()
}

fn default_statement_descriptor() -> String {
    "PREMIX".to_string()
}
