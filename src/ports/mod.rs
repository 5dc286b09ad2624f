//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `AccountRepository` - Account storage with the conditional activation write
//! - `SubscriptionRepository` - Subscription records
//! - `ContactRepository` - Contact inquiries
//!
//! ## External Service Ports
//!
//! - `PaymentGateway` - Checkout preferences, payments and merchant orders
//! - `CredentialHasher` - One-way credential hashing
//!
//! ## Processing Ports
//!
//! - `NotificationProcessor` - Resolves one notification to activations

mod account_repository;
mod contact_repository;
mod credential_hasher;
mod notification_processor;
mod payment_gateway;
mod subscription_repository;

pub use account_repository::AccountRepository;
pub use contact_repository::ContactRepository;
pub use credential_hasher::CredentialHasher;
pub use notification_processor::{
    NotificationOutcome, NotificationProcessor, PaymentOutcome, ProcessingError,
};
pub use payment_gateway::{GatewayError, GatewayErrorCode, PaymentGateway};
pub use subscription_repository::SubscriptionRepository;
