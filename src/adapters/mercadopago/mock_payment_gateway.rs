//! Mock payment gateway for testing.
//!
//! Configurable `PaymentGateway` for unit and integration tests. Supports:
//! - Pre-configured payments, merchant orders and preferences
//! - Sticky and one-shot error injection per method
//! - Call tracking

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::billing::{CheckoutPreference, CreatedPreference, GatewayPayment, MerchantOrder};
use crate::ports::{GatewayError, PaymentGateway};

/// Mock payment gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.set_payment(GatewayPayment { id: "PAY1".into(), ... });
/// gateway.queue_method_error("get_payment", GatewayError::not_found("payment PAY1"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    payments: HashMap<String, GatewayPayment>,
    orders: HashMap<String, MerchantOrder>,
    next_preference: Option<CreatedPreference>,

    /// Returned on every call to the method until cleared.
    method_errors: HashMap<String, GatewayError>,

    /// Consumed one per call, before sticky errors.
    queued_errors: HashMap<String, VecDeque<GatewayError>>,

    created_preferences: Vec<CheckoutPreference>,
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Adds or replaces a payment.
    pub fn set_payment(&self, payment: GatewayPayment) {
        let id = payment.id.clone();
        self.inner.lock().unwrap().payments.insert(id, payment);
    }

    /// Adds or replaces a merchant order.
    pub fn set_order(&self, order: MerchantOrder) {
        let id = order.id.clone();
        self.inner.lock().unwrap().orders.insert(id, order);
    }

    /// Sets the acknowledgment returned by `create_preference`.
    pub fn set_preference(&self, preference: CreatedPreference) {
        self.inner.lock().unwrap().next_preference = Some(preference);
    }

    /// Fails every call to `method` with `error`.
    pub fn set_method_error(&self, method: &str, error: GatewayError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Fails the next call to `method` with `error`.
    pub fn queue_method_error(&self, method: &str, error: GatewayError) {
        self.inner
            .lock()
            .unwrap()
            .queued_errors
            .entry(method.to_string())
            .or_default()
            .push_back(error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.method_errors.clear();
        state.queued_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Preferences submitted so far, oldest first.
    pub fn created_preferences(&self) -> Vec<CheckoutPreference> {
        self.inner.lock().unwrap().created_preferences.clone()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), GatewayError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state
            .queued_errors
            .get_mut(method)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_preference(
        &self,
        preference: &CheckoutPreference,
    ) -> Result<CreatedPreference, GatewayError> {
        self.record_call(
            "create_preference",
            vec![preference.external_reference.clone()],
        );
        self.check_error("create_preference")?;

        let mut state = self.inner.lock().unwrap();
        state.created_preferences.push(preference.clone());

        let count = state.created_preferences.len();
        Ok(state
            .next_preference
            .clone()
            .unwrap_or_else(|| CreatedPreference {
                id: format!("pref_mock_{}", count),
                init_point: Some(format!(
                    "https://www.mercadopago.com.br/checkout/v1/redirect?pref_id=pref_mock_{}",
                    count
                )),
                sandbox_init_point: None,
            }))
    }

    async fn get_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        self.record_call("get_payment", vec![payment_id.to_string()]);
        self.check_error("get_payment")?;

        self.inner
            .lock()
            .unwrap()
            .payments
            .get(payment_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(&format!("payment {}", payment_id)))
    }

    async fn get_merchant_order(&self, order_id: &str) -> Result<MerchantOrder, GatewayError> {
        self.record_call("get_merchant_order", vec![order_id.to_string()]);
        self.check_error("get_merchant_order")?;

        self.inner
            .lock()
            .unwrap()
            .orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(&format!("merchant order {}", order_id)))
    }
}
