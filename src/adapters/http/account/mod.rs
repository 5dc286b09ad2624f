//! HTTP adapter for account endpoints.
//!
//! - `POST /accounts/register` - Create a pending account
//! - `GET /accounts` - List accounts
//! - `POST /accounts/verify-email` - Email existence check
//! - `POST /accounts/verify-username` - Username existence check
//! - `POST /accounts/find-by-email` - Lookup that 404s when absent

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AccountApiError, AccountAppState};
pub use routes::account_router;
