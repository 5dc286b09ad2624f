//! Contact-specific error types.

use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::ContactStatus;

/// Errors raised by contact operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    ValidationFailed { field: String, message: String },
    TermsNotAccepted,
    InvalidId(String),
    NotFound(String),
    InvalidTransition { from: ContactStatus, to: ContactStatus },
    Infrastructure(String),
}

impl ContactError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ContactError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        ContactError::NotFound(id.into())
    }

    pub fn invalid_transition(from: ContactStatus, to: ContactStatus) -> Self {
        ContactError::InvalidTransition { from, to }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ContactError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ContactError::ValidationFailed { .. }
            | ContactError::TermsNotAccepted
            | ContactError::InvalidId(_) => ErrorCode::ValidationFailed,
            ContactError::NotFound(_) => ErrorCode::ContactNotFound,
            ContactError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            ContactError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ContactError::ValidationFailed { field, message } => {
                format!("Field '{}' {}", field, message)
            }
            ContactError::TermsNotAccepted => "Terms of use must be accepted".to_string(),
            ContactError::InvalidId(id) => format!("Invalid contact id: {}", id),
            ContactError::NotFound(id) => format!("Contact not found: {}", id),
            ContactError::InvalidTransition { from, to } => format!(
                "Cannot change contact status from {} to {}",
                from.as_str(),
                to.as_str()
            ),
            ContactError::Infrastructure(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ContactError {}

impl From<DomainError> for ContactError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ContactNotFound => ContactError::NotFound(err.message),
            _ => ContactError::infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_message_names_both_statuses() {
        let err = ContactError::invalid_transition(ContactStatus::Responded, ContactStatus::Pending);
        assert_eq!(
            err.message(),
            "Cannot change contact status from responded to pending"
        );
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn store_not_found_maps_to_not_found() {
        let err: ContactError = DomainError::new(ErrorCode::ContactNotFound, "abc").into();
        assert_eq!(err, ContactError::NotFound("abc".to_string()));
    }
}
