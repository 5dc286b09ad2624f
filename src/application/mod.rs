//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Write paths (registration, checkout, activation) and read paths
//! (listings, lookups) live in separate handlers.

pub mod handlers;

pub use handlers::{
    ActivationEngine, NotificationQueue, NotificationWorker, QueueError, RetryPolicy,
};
