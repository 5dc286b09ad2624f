//! Mercado Pago payment gateway adapter.
//!
//! Implements the `PaymentGateway` port over the Mercado Pago REST API:
//! - `POST /checkout/preferences`
//! - `GET /v1/payments/{id}`
//! - `GET /merchant_orders/{id}` (served from the Mercado Libre API host)
//!
//! # Configuration
//!
//! ```ignore
//! let config = MercadoPagoConfig::new(access_token)
//!     .with_timeout(Duration::from_secs(5));
//! let adapter = MercadoPagoAdapter::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::domain::billing::{
    is_gateway_id, CheckoutPreference, CreatedPreference, GatewayPayment, MerchantOrder,
};
use crate::ports::{GatewayError, PaymentGateway};

use super::wire_types::{MerchantOrderResponse, PaymentResponse, PreferenceRequest, PreferenceResponse};

const DEFAULT_API_BASE_URL: &str = "https://api.mercadopago.com";
const DEFAULT_ORDER_BASE_URL: &str = "https://api.mercadolibre.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Mercado Pago API configuration.
#[derive(Clone)]
pub struct MercadoPagoConfig {
    /// Bearer token; `None` makes every call fail with `Configuration`.
    access_token: Option<SecretString>,

    /// Base URL for payments and preferences.
    api_base_url: String,

    /// Base URL for merchant orders.
    merchant_order_base_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl MercadoPagoConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        let token = access_token.into();
        Self {
            access_token: (!token.trim().is_empty()).then(|| SecretString::new(token)),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            merchant_order_base_url: DEFAULT_ORDER_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration without a token. Every gateway call is refused.
    pub fn unconfigured() -> Self {
        Self::new("")
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_merchant_order_base_url(mut self, url: impl Into<String>) -> Self {
        self.merchant_order_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }
}

impl std::fmt::Debug for MercadoPagoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MercadoPagoConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("merchant_order_base_url", &self.merchant_order_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Mercado Pago payment gateway adapter.
pub struct MercadoPagoAdapter {
    config: MercadoPagoConfig,
    http_client: reqwest::Client,
}

impl MercadoPagoAdapter {
    pub fn new(config: MercadoPagoConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn token(&self) -> Result<&str, GatewayError> {
        self.config
            .access_token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .ok_or_else(|| GatewayError::configuration("Mercado Pago access token is not configured"))
    }

    /// Sends a request and decodes a successful JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
        resource: &str,
    ) -> Result<T, GatewayError> {
        let response = request
            .bearer_auth(self.token()?)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                operation = operation,
                resource = %resource,
                status = status.as_u16(),
                error = %body,
                "Mercado Pago request failed"
            );
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(GatewayError::not_found(resource).with_http_status(404));
            }
            return Err(GatewayError::from_http_status(
                status.as_u16(),
                format!("Mercado Pago API error: {}", body),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            GatewayError::invalid_response(format!(
                "Failed to parse Mercado Pago {} response: {}",
                operation, e
            ))
        })
    }
}

fn transport_error(operation: &str, err: reqwest::Error) -> GatewayError {
    tracing::warn!(operation = operation, error = %err, "Mercado Pago transport failure");
    if err.is_timeout() {
        GatewayError::timeout(format!("{} timed out", operation))
    } else {
        GatewayError::network(err.to_string())
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoAdapter {
    async fn create_preference(
        &self,
        preference: &CheckoutPreference,
    ) -> Result<CreatedPreference, GatewayError> {
        let url = format!("{}/checkout/preferences", self.config.api_base_url);
        let body = PreferenceRequest::from(preference);

        let created: PreferenceResponse = self
            .execute(
                self.http_client.post(&url).json(&body),
                "create_preference",
                &preference.external_reference,
            )
            .await?;

        tracing::info!(
            preference_id = %created.id,
            external_reference = %preference.external_reference,
            "Checkout preference created"
        );
        Ok(created.into())
    }

    async fn get_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let payment_id = path_id(payment_id)?;
        let url = format!("{}/v1/payments/{}", self.config.api_base_url, payment_id);
        let payment: PaymentResponse = self
            .execute(
                self.http_client.get(&url),
                "get_payment",
                &format!("payment {}", payment_id),
            )
            .await?;
        Ok(payment.into())
    }

    async fn get_merchant_order(&self, order_id: &str) -> Result<MerchantOrder, GatewayError> {
        let order_id = path_id(order_id)?;
        let url = format!(
            "{}/merchant_orders/{}",
            self.config.merchant_order_base_url, order_id
        );
        let order: MerchantOrderResponse = self
            .execute(
                self.http_client.get(&url),
                "get_merchant_order",
                &format!("merchant order {}", order_id),
            )
            .await?;
        Ok(order.into())
    }
}

/// Ids are interpolated into URL paths and must be plain.
fn path_id(id: &str) -> Result<&str, GatewayError> {
    if is_gateway_id(id) {
        Ok(id)
    } else {
        Err(GatewayError::provider(format!("Refusing malformed resource id {:?}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{CheckoutKind, CheckoutSettings, Plan, RedirectUrls};
    use crate::domain::foundation::AccountId;
    use crate::ports::GatewayErrorCode;

    fn preference() -> CheckoutPreference {
        CheckoutPreference::for_account(
            AccountId::new(),
            Plan::Basico,
            CheckoutKind::NewSignup,
            &CheckoutSettings {
                redirect_urls: RedirectUrls {
                    success: "s".to_string(),
                    failure: "f".to_string(),
                    pending: "p".to_string(),
                },
                notification_url: "n".to_string(),
                statement_descriptor: "PREMIX".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn config_new_sets_defaults() {
        let config = MercadoPagoConfig::new("APP_USR-token");
        assert!(config.is_configured());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.merchant_order_base_url, DEFAULT_ORDER_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn blank_token_is_unconfigured() {
        assert!(!MercadoPagoConfig::new("   ").is_configured());
        assert!(!MercadoPagoConfig::unconfigured().is_configured());
    }

    #[test]
    fn config_builders() {
        let config = MercadoPagoConfig::new("t")
            .with_base_url("http://localhost:1")
            .with_merchant_order_base_url("http://localhost:2")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.api_base_url, "http://localhost:1");
        assert_eq!(config.merchant_order_base_url, "http://localhost:2");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn debug_redacts_token() {
        let config = MercadoPagoConfig::new("APP_USR-very-secret");
        assert!(!format!("{:?}", config).contains("very-secret"));
    }

    #[tokio::test]
    async fn unconfigured_adapter_refuses_calls() {
        let adapter = MercadoPagoAdapter::new(MercadoPagoConfig::unconfigured());

        let err = adapter.create_preference(&preference()).await.unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::Configuration);

        let err = adapter.get_payment("1").await.unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::Configuration);
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn unreachable_gateway_is_transient() {
        // Port 9 (discard) on localhost refuses connections.
        let adapter = MercadoPagoAdapter::new(
            MercadoPagoConfig::new("t")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_millis(500)),
        );

        let err = adapter.get_payment("1").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn malformed_ids_never_reach_the_network() {
        let adapter = MercadoPagoAdapter::new(
            MercadoPagoConfig::new("t")
                .with_base_url("http://127.0.0.1:9")
                .with_merchant_order_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_millis(500)),
        );

        let err = adapter
            .get_payment("../../merchant_orders/55")
            .await
            .unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::Provider);
        assert!(!err.is_transient());

        let err = adapter.get_merchant_order("55?x=1").await.unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::Provider);
    }
}
