//! HTTP adapter for gateway notifications.
//!
//! - `POST /webhooks/payment-provider` (alias `/webhooks/mercadopago`)
//!
//! The endpoint always answers `200 OK`. Processing happens on the
//! notification worker.

pub mod handlers;
pub mod routes;

pub use handlers::WebhookAppState;
pub use routes::webhook_router;
