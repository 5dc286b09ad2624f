//! PremiX signup server.
//!
//! Loads configuration, connects to PostgreSQL, starts the notification
//! worker and serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use premix_signup::adapters::http::{
    app_router, AccountAppState, AppState, ContactAppState, HttpSettings, PaymentAppState,
    SubscriptionAppState, WebhookAppState,
};
use premix_signup::adapters::mercadopago::MercadoPagoAdapter;
use premix_signup::adapters::postgres::{
    run_migrations, PostgresAccountRepository, PostgresContactRepository,
    PostgresSubscriptionRepository,
};
use premix_signup::adapters::security::Argon2Hasher;
use premix_signup::application::{ActivationEngine, NotificationWorker};
use premix_signup::config::AppConfig;
use premix_signup::ports::{
    AccountRepository, ContactRepository, CredentialHasher, PaymentGateway, SubscriptionRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config);
    config.validate().context("validating configuration")?;

    tracing::info!(
        environment = ?config.server.environment,
        database = %config.database.redacted_url(),
        sandbox = config.payment.is_sandbox(),
        "Starting PremiX signup service"
    );
    if !config.payment.has_access_token() {
        tracing::warn!("No payment access token configured; checkout and activation will fail");
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await
        .context("connecting to PostgreSQL")?;

    if config.database.run_migrations {
        run_migrations(&pool).await.context("running migrations")?;
        tracing::info!("Database migrations applied");
    }

    let accounts: Arc<dyn AccountRepository> =
        Arc::new(PostgresAccountRepository::new(pool.clone()));
    let subscriptions: Arc<dyn SubscriptionRepository> =
        Arc::new(PostgresSubscriptionRepository::new(pool.clone()));
    let contacts: Arc<dyn ContactRepository> = Arc::new(PostgresContactRepository::new(pool));
    let gateway: Arc<dyn PaymentGateway> =
        Arc::new(MercadoPagoAdapter::new(config.payment.gateway_config()));
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new());

    let engine = Arc::new(ActivationEngine::new(accounts.clone(), gateway.clone()));
    let (worker, queue) = NotificationWorker::new(
        engine,
        config.webhook.retry_policy(),
        config.webhook.queue_capacity,
    );
    let worker_task = tokio::spawn(worker.run());

    let mut webhook = WebhookAppState::new(queue.clone());
    match config.payment.webhook_verifier() {
        Some(verifier) => webhook = webhook.with_verifier(verifier),
        None => tracing::info!("Webhook signature verification disabled"),
    }

    let state = AppState {
        account: AccountAppState::new(accounts.clone(), hasher),
        payment: PaymentAppState::new(
            accounts.clone(),
            gateway,
            config.payment.checkout_settings(),
        ),
        webhook,
        subscription: SubscriptionAppState::new(accounts, subscriptions),
        contact: ContactAppState::new(contacts),
    };
    let settings = HttpSettings {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };
    let app = app_router(state, &settings);

    let addr = config
        .server
        .socket_addr()
        .context("parsing server bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    queue.shutdown();
    if let Err(err) = worker_task.await {
        tracing::error!(error = %err, "Notification worker terminated abnormally");
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
