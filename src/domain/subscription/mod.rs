//! Subscription domain module.
//!
//! A subscription records which plan an account bought and for how long.
//! Its status is independent of the account's activation flag.

mod aggregate;
mod status;

pub use aggregate::Subscription;
pub use status::SubscriptionStatus;
