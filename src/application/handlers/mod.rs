//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod contact;
pub mod payment;
pub mod subscription;
pub mod webhook;

pub use account::{
    AccountLookup, ListAccountsHandler, RegisterAccountCommand, RegisterAccountHandler,
    RegisterAccountResult, VerifyAccountHandler, VerifyAccountResult,
};
pub use contact::{
    ContactStats, ContactStatsHandler, DeleteContactHandler, GetContactHandler,
    ListContactsHandler, ListContactsQuery, SubmitContactCommand, SubmitContactHandler,
    UpdateContactStatusCommand, UpdateContactStatusHandler,
};
pub use payment::{
    CheckPaymentHandler, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult,
};
pub use subscription::{
    CancelSubscriptionHandler, ListSubscriptionsHandler, RegisterSubscriptionCommand,
    RegisterSubscriptionHandler,
};
pub use webhook::{
    ActivationEngine, NotificationJob, NotificationQueue, NotificationWorker, QueueError,
    RetryPolicy,
};
