//! Contact inquiry aggregate.

use crate::domain::foundation::{ContactId, StateMachine, Timestamp};

use super::{ContactError, ContactStatus};

/// Unvalidated contact form submission.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub accepted_terms: bool,
    pub accepted_news: bool,
}

/// Inbound inquiry from the public contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub accepted_terms: bool,
    pub accepted_news: bool,
    pub sent_at: Timestamp,
    pub status: ContactStatus,
}

impl Contact {
    /// Validates a submission and creates a pending contact.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for blank fields or a malformed phone
    /// - `TermsNotAccepted` when the terms box was not ticked
    pub fn create(input: NewContact, sent_at: Timestamp) -> Result<Self, ContactError> {
        let name = required("name", &input.name)?;
        let phone = required("phone", &input.phone)?;
        let company = required("company", &input.company)?;
        let message = required("message", &input.message)?;

        if !input.accepted_terms {
            return Err(ContactError::TermsNotAccepted);
        }
        if !is_valid_phone(&phone) {
            return Err(ContactError::validation(
                "phone",
                "expected format (11) 99999-9999",
            ));
        }

        Ok(Self {
            id: ContactId::new(),
            name,
            phone,
            company,
            message,
            accepted_terms: true,
            accepted_news: input.accepted_news,
            sent_at,
            status: ContactStatus::Pending,
        })
    }

    /// Moves the contact through its triage workflow.
    pub fn change_status(&mut self, target: ContactStatus) -> Result<(), ContactError> {
        if self.status == target {
            return Ok(());
        }
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| ContactError::invalid_transition(self.status, target))?;
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<String, ContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Brazilian phone in `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD` form.
fn is_valid_phone(phone: &str) -> bool {
    let Some(rest) = phone.strip_prefix('(') else {
        return false;
    };
    let Some((area, rest)) = rest.split_once(") ") else {
        return false;
    };
    let Some((prefix, line)) = rest.split_once('-') else {
        return false;
    };

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    area.len() == 2
        && all_digits(area)
        && (prefix.len() == 4 || prefix.len() == 5)
        && all_digits(prefix)
        && line.len() == 4
        && all_digits(line)
}

/// Listing filters; every field is optional.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub status: Option<ContactStatus>,
    /// Case-insensitive substring of the company name.
    pub company: Option<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl ContactFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(status) = self.status {
            if contact.status != status {
                return false;
            }
        }
        if let Some(company) = &self.company {
            if !contact
                .company
                .to_lowercase()
                .contains(&company.trim().to_lowercase())
            {
                return false;
            }
        }
        if let Some(from) = &self.from {
            if contact.sent_at.is_before(from) {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if to.is_before(&contact.sent_at) {
                return false;
            }
        }
        true
    }
}
