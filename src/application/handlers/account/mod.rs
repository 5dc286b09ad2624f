//! Account handlers.
//!
//! ## Commands
//! - Registering a pending account
//!
//! ## Queries
//! - Listing accounts
//! - Email / username existence checks

mod list_accounts;
mod register_account;
mod verify_account;

// Commands
pub use register_account::{RegisterAccountCommand, RegisterAccountHandler, RegisterAccountResult};

// Queries
pub use list_accounts::ListAccountsHandler;
pub use verify_account::{AccountLookup, VerifyAccountHandler, VerifyAccountResult};
