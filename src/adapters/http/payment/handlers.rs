//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    CheckPaymentHandler, CreateCheckoutCommand, CreateCheckoutHandler,
};
use crate::domain::account::AccountError;
use crate::domain::billing::{CheckoutKind, CheckoutSettings};
use crate::ports::{AccountRepository, PaymentGateway};

use super::super::account::AccountApiError;
use super::super::extract::JsonBody;
use super::dto::{
    CheckPaymentRequest, CheckPaymentResponse, CheckoutResponse, CreatePreferenceRequest,
    GatewayFailureResponse,
};

#[derive(Clone)]
pub struct PaymentAppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub settings: CheckoutSettings,
}

impl PaymentAppState {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        gateway: Arc<dyn PaymentGateway>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            accounts,
            gateway,
            settings,
        }
    }

    pub fn checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.accounts.clone(),
            self.gateway.clone(),
            self.settings.clone(),
        )
    }

    pub fn check_payment_handler(&self) -> CheckPaymentHandler {
        CheckPaymentHandler::new(self.gateway.clone())
    }
}

/// POST /payments/create-preference
pub async fn create_preference(
    State(state): State<PaymentAppState>,
    JsonBody(request): JsonBody<CreatePreferenceRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    checkout(state, request, CheckoutKind::NewSignup).await
}

/// POST /payments/create-existing
pub async fn create_existing(
    State(state): State<PaymentAppState>,
    JsonBody(request): JsonBody<CreatePreferenceRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    checkout(state, request, CheckoutKind::ExistingAccount).await
}

async fn checkout(
    state: PaymentAppState,
    request: CreatePreferenceRequest,
    kind: CheckoutKind,
) -> Result<Json<CheckoutResponse>, CheckoutApiError> {
    let cmd = CreateCheckoutCommand {
        account_id: request.account_id,
        plan: request.plan,
        kind,
    };

    let result = state
        .checkout_handler()
        .handle(cmd)
        .await
        .map_err(|e| CheckoutApiError::new(e, "create_preference"))?;

    Ok(Json(CheckoutResponse::from(result)))
}

/// POST /payments/check-payment
pub async fn check_payment(
    State(state): State<PaymentAppState>,
    JsonBody(request): JsonBody<CheckPaymentRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let payment = state
        .check_payment_handler()
        .handle(&request.payment_id)
        .await
        .map_err(|e| CheckoutApiError::new(e, "check_payment"))?;

    Ok(Json(CheckPaymentResponse::from(payment)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Payment endpoint error. Gateway-side failures use the
/// `{success, error, details, step}` body; the rest render like account errors.
#[derive(Debug)]
pub struct CheckoutApiError {
    error: AccountError,
    step: &'static str,
}

impl CheckoutApiError {
    pub fn new(error: AccountError, step: &'static str) -> Self {
        Self { error, step }
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let details = match &self.error {
            AccountError::Gateway { details } => details.clone(),
            AccountError::CheckoutUrlMissing | AccountError::Configuration(_) => {
                self.error.message()
            }
            _ => return AccountApiError(self.error).into_response(),
        };

        tracing::error!(step = self.step, error = %self.error, "Payment gateway call failed");

        let body = GatewayFailureResponse {
            success: false,
            error: "Payment gateway request failed".to_string(),
            details,
            step: self.step,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
