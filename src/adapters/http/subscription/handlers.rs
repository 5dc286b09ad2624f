//! HTTP handlers for subscription endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::subscription::{
    CancelSubscriptionHandler, ListSubscriptionsHandler, RegisterSubscriptionCommand,
    RegisterSubscriptionHandler,
};
use crate::ports::{AccountRepository, SubscriptionRepository};

use super::super::account::AccountApiError;
use super::super::extract::JsonBody;
use super::dto::{
    RegisterSubscriptionRequest, SubscriptionListResponse, SubscriptionMessageResponse,
    SubscriptionResponse,
};

#[derive(Clone)]
pub struct SubscriptionAppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionAppState {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            accounts,
            subscriptions,
        }
    }

    pub fn register_handler(&self) -> RegisterSubscriptionHandler {
        RegisterSubscriptionHandler::new(self.accounts.clone(), self.subscriptions.clone())
    }

    pub fn list_handler(&self) -> ListSubscriptionsHandler {
        ListSubscriptionsHandler::new(self.accounts.clone(), self.subscriptions.clone())
    }

    pub fn cancel_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.subscriptions.clone())
    }
}

/// POST /subscriptions/register
pub async fn register_subscription(
    State(state): State<SubscriptionAppState>,
    JsonBody(request): JsonBody<RegisterSubscriptionRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let cmd = RegisterSubscriptionCommand {
        plan: request.plan,
        account_id: request.account_id,
    };

    let subscription = state.register_handler().handle(cmd).await?;

    let response = SubscriptionMessageResponse {
        message: "Subscription registered".to_string(),
        subscription: subscription.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /subscriptions/account/:account_id
pub async fn list_account_subscriptions(
    State(state): State<SubscriptionAppState>,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, AccountApiError> {
    let subscriptions: Vec<SubscriptionResponse> = state
        .list_handler()
        .handle(&account_id)
        .await?
        .into_iter()
        .map(SubscriptionResponse::from)
        .collect();

    Ok(Json(SubscriptionListResponse {
        total: subscriptions.len(),
        subscriptions,
    }))
}

/// POST /subscriptions/:id/cancel
pub async fn cancel_subscription(
    State(state): State<SubscriptionAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AccountApiError> {
    let subscription = state.cancel_handler().handle(&id).await?;

    Ok(Json(SubscriptionMessageResponse {
        message: "Subscription cancelled".to_string(),
        subscription: subscription.into(),
    }))
}
