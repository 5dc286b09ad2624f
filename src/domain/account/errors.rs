//! Account and checkout error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | DuplicateField | 400 |
//! | InvalidPlan | 400 |
//! | NotFound | 404 |
//! | CheckoutUrlMissing | 500 |
//! | Gateway | 500 |
//! | Configuration | 500 |
//! | Infrastructure | 500 |

use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Unique account field that collided with an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DuplicateField {
    Username,
    Email,
    NationalId,
}

impl DuplicateField {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateField::Username => "username",
            DuplicateField::Email => "email",
            DuplicateField::NationalId => "nationalId",
        }
    }

    /// Maps a store-reported field or constraint name back to the field.
    pub fn from_store_name(name: &str) -> Option<Self> {
        match name {
            "username" | "usuario" | "accounts_username_key" => Some(DuplicateField::Username),
            "email" | "accounts_email_key" => Some(DuplicateField::Email),
            "nationalId" | "national_id" | "cpf" | "accounts_national_id_key" => {
                Some(DuplicateField::NationalId)
            }
            _ => None,
        }
    }
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the account, checkout and subscription operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Missing or malformed input.
    ValidationFailed { field: String, message: String },

    /// A unique field is already taken.
    DuplicateField(DuplicateField),

    /// No account exists with this id or email.
    NotFound(String),

    /// No subscription exists with this id.
    SubscriptionNotFound(String),

    /// Plan name is not in the price table.
    InvalidPlan(String),

    /// Gateway accepted the preference but returned no checkout URL.
    CheckoutUrlMissing,

    /// Payment gateway failure.
    Gateway { details: String },

    /// Required configuration is absent.
    Configuration(String),

    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn duplicate(field: DuplicateField) -> Self {
        AccountError::DuplicateField(field)
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AccountError::NotFound(what.into())
    }

    pub fn invalid_plan(plan: impl Into<String>) -> Self {
        AccountError::InvalidPlan(plan.into())
    }

    pub fn gateway(details: impl Into<String>) -> Self {
        AccountError::Gateway {
            details: details.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AccountError::Configuration(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::ValidationFailed { .. } | AccountError::InvalidPlan(_) => {
                ErrorCode::ValidationFailed
            }
            AccountError::DuplicateField(_) => ErrorCode::DuplicateKey,
            AccountError::NotFound(_) => ErrorCode::AccountNotFound,
            AccountError::SubscriptionNotFound(_) => ErrorCode::SubscriptionNotFound,
            AccountError::Infrastructure(_) => ErrorCode::DatabaseError,
            AccountError::CheckoutUrlMissing
            | AccountError::Gateway { .. }
            | AccountError::Configuration(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        match self {
            AccountError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccountError::DuplicateField(field) => match field {
                DuplicateField::Username => "This username is already in use".to_string(),
                DuplicateField::Email => "This email is already registered".to_string(),
                DuplicateField::NationalId => "This national id is already registered".to_string(),
            },
            AccountError::NotFound(what) => format!("Account not found: {}", what),
            AccountError::SubscriptionNotFound(id) => format!("Subscription not found: {}", id),
            AccountError::InvalidPlan(plan) => format!("Unknown plan: {}", plan),
            AccountError::CheckoutUrlMissing => {
                "Payment gateway did not return a checkout URL".to_string()
            }
            AccountError::Gateway { details } => format!("Payment gateway error: {}", details),
            AccountError::Configuration(msg) => format!("Configuration error: {}", msg),
            AccountError::Infrastructure(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateKey => match err.detail("field").and_then(DuplicateField::from_store_name) {
                Some(field) => AccountError::DuplicateField(field),
                None => AccountError::infrastructure(err.to_string()),
            },
            ErrorCode::AccountNotFound => AccountError::NotFound(err.message),
            ErrorCode::SubscriptionNotFound => AccountError::SubscriptionNotFound(err.message),
            ErrorCode::ValidationFailed => AccountError::validation(
                err.detail("field").unwrap_or("request").to_string(),
                err.message,
            ),
            _ => AccountError::infrastructure(err.to_string()),
        }
    }
}
