//! Subscription handlers.

mod cancel_subscription;
mod list_subscriptions;
mod register_subscription;

pub use cancel_subscription::CancelSubscriptionHandler;
pub use list_subscriptions::ListSubscriptionsHandler;
pub use register_subscription::{RegisterSubscriptionCommand, RegisterSubscriptionHandler};
