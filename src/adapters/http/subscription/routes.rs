//! Route configuration for subscription endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    cancel_subscription, list_account_subscriptions, register_subscription, SubscriptionAppState,
};

pub fn subscription_router() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/subscriptions/register", post(register_subscription))
        .route(
            "/subscriptions/account/:account_id",
            get(list_account_subscriptions),
        )
        .route("/subscriptions/:id/cancel", post(cancel_subscription))
}
