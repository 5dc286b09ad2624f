//! In-memory repository adapters.
//!
//! Same contracts as the PostgreSQL adapters, backed by `tokio::sync::RwLock`.

mod account_repository;
mod contact_repository;
mod subscription_repository;

pub use account_repository::InMemoryAccountRepository;
pub use contact_repository::InMemoryContactRepository;
pub use subscription_repository::InMemorySubscriptionRepository;
