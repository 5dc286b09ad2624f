//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAccountRepository` - Accounts with constraint-backed uniqueness
//! - `PostgresSubscriptionRepository` - Plan purchases
//! - `PostgresContactRepository` - Contact inquiries with filtered listing
//!
//! Schema lives in `migrations/` and is applied with [`run_migrations`].

mod account_repository;
mod contact_repository;
mod subscription_repository;

pub use account_repository::PostgresAccountRepository;
pub use contact_repository::PostgresContactRepository;
pub use subscription_repository::PostgresSubscriptionRepository;

use sqlx::PgPool;

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
