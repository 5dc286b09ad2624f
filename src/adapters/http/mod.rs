//! HTTP adapters - REST API implementations.
//!
//! Each area has its own state, handlers and router. [`app_router`] merges
//! them and applies the shared middleware.

pub mod account;
pub mod app;
pub mod contact;
pub mod error;
pub mod extract;
pub mod payment;
pub mod subscription;
pub mod webhook;

pub use account::{account_router, AccountApiError, AccountAppState};
pub use app::{app_router, AppState, HttpSettings};
pub use contact::{contact_router, ContactApiError, ContactAppState};
pub use error::ErrorResponse;
pub use extract::{JsonBody, JsonBodyRejection};
pub use payment::{payment_router, CheckoutApiError, PaymentAppState};
pub use subscription::{subscription_router, SubscriptionAppState};
pub use webhook::{webhook_router, WebhookAppState};
