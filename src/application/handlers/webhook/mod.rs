//! Webhook handlers.
//!
//! Payment notifications are acknowledged at the HTTP edge, queued, and
//! resolved in the background:
//!
//! - `ActivationEngine` - re-fetches payments and activates accounts
//! - `NotificationWorker` / `NotificationQueue` - background processing
//! - `RetryPolicy` - bounded backoff for transient failures and pending payments

mod activation_engine;
mod notification_worker;
mod retry_policy;

pub use activation_engine::ActivationEngine;
pub use notification_worker::{NotificationJob, NotificationQueue, NotificationWorker, QueueError};
pub use retry_policy::RetryPolicy;
