//! Payment gateway port.
//!
//! The gateway owns checkout preferences, payments and merchant orders.
//! This system creates preferences and reads payments and orders back; it
//! never trusts the contents of a notification without re-fetching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::billing::{CheckoutPreference, CreatedPreference, GatewayPayment, MerchantOrder};

/// Port for the external payment processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submits a checkout preference and returns the gateway's acknowledgment.
    ///
    /// # Errors
    ///
    /// - `Configuration` if no access token is configured
    /// - `Network` / `Timeout` on transport failures
    /// - `Provider` when the gateway rejects the preference
    async fn create_preference(
        &self,
        preference: &CheckoutPreference,
    ) -> Result<CreatedPreference, GatewayError>;

    /// Fetches a payment by gateway id.
    ///
    /// # Errors
    ///
    /// - `NotFound` while the payment is not yet visible (transient)
    async fn get_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;

    /// Fetches a merchant order by gateway id.
    async fn get_merchant_order(&self, order_id: &str) -> Result<MerchantOrder, GatewayError>;
}

/// Errors from payment gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct GatewayError {
    /// Error category.
    pub code: GatewayErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status returned by the gateway, if any.
    pub http_status: Option<u16>,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Configuration, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Timeout, message)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(GatewayErrorCode::NotFound, format!("{} not found", resource))
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Authentication, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidResponse, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Provider, message)
    }

    /// Whether a delayed retry may succeed.
    pub fn is_transient(&self) -> bool {
        self.code.is_transient()
    }

    /// Maps an HTTP error status to an error category.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let code = match status {
            401 | 403 => GatewayErrorCode::Authentication,
            404 => GatewayErrorCode::NotFound,
            408 | 504 => GatewayErrorCode::Timeout,
            429 => GatewayErrorCode::RateLimited,
            500..=599 => GatewayErrorCode::Network,
            _ => GatewayErrorCode::Provider,
        };
        Self::new(code, body).with_http_status(status)
    }
}

/// Gateway error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Access token or other required setting is missing.
    Configuration,

    /// Connection failure or gateway-side 5xx.
    Network,

    /// Request exceeded the client timeout.
    Timeout,

    /// Resource is not (yet) visible.
    NotFound,

    /// Credentials rejected.
    Authentication,

    /// Too many requests.
    RateLimited,

    /// Response body could not be decoded.
    InvalidResponse,

    /// Any other rejection by the gateway.
    Provider,
}

impl GatewayErrorCode {
    /// Categories eligible for the notification retry policy. `NotFound`
    /// covers payments not yet visible after their notification.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::Network
                | GatewayErrorCode::Timeout
                | GatewayErrorCode::NotFound
                | GatewayErrorCode::Authentication
                | GatewayErrorCode::RateLimited
        )
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::Configuration => "configuration_error",
            GatewayErrorCode::Network => "network_error",
            GatewayErrorCode::Timeout => "timeout",
            GatewayErrorCode::NotFound => "not_found",
            GatewayErrorCode::Authentication => "authentication_error",
            GatewayErrorCode::RateLimited => "rate_limited",
            GatewayErrorCode::InvalidResponse => "invalid_response",
            GatewayErrorCode::Provider => "provider_error",
        };
        write!(f, "{}", s)
    }
}
