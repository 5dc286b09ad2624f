//! Top-level router: every area router plus the shared middleware stack.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::account::{account_router, AccountAppState};
use super::contact::{contact_router, ContactAppState};
use super::payment::{payment_router, PaymentAppState};
use super::subscription::{subscription_router, SubscriptionAppState};
use super::webhook::{webhook_router, WebhookAppState};

/// State of every area router.
#[derive(Clone)]
pub struct AppState {
    pub account: AccountAppState,
    pub payment: PaymentAppState,
    pub webhook: WebhookAppState,
    pub subscription: SubscriptionAppState,
    pub contact: ContactAppState,
}

/// Middleware settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds the full application router.
pub fn app_router(state: AppState, settings: &HttpSettings) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(account_router().with_state(state.account))
        .merge(payment_router().with_state(state.payment))
        .merge(webhook_router().with_state(state.webhook))
        .merge(subscription_router().with_state(state.subscription))
        .merge(contact_router().with_state(state.contact))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .allow_credentials(true)
}

async fn root() -> &'static str {
    "API PremiX está rodando!"
}

async fn health() -> &'static str {
    "OK"
}
