//! HTTP adapter for subscription endpoints.
//!
//! - `POST /subscriptions/register` - Record a plan purchase
//! - `GET /subscriptions/account/:account_id` - Subscriptions of an account
//! - `POST /subscriptions/:id/cancel` - Cancel an active subscription

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SubscriptionAppState;
pub use routes::subscription_router;
