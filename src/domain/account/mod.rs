//! Account domain module.
//!
//! Account holders ("managers") who sign up, pay for a plan and are then
//! activated by confirmed payments.

mod aggregate;
mod credentials;
mod errors;

pub use aggregate::{
    Account, AccountParts, AccountPaymentStatus, AccountSummary, ActivationOutcome,
};
pub use credentials::{
    normalize_email, normalize_national_id, normalize_username, validate_credential, Email,
    NationalId, PasswordHash, Username, MIN_CREDENTIAL_LENGTH,
};
pub use errors::{AccountError, DuplicateField};
