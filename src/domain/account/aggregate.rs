//! Account aggregate entity.
//!
//! An account is created pending and moves to active exactly once, when an
//! approved payment referencing it is confirmed. It is never deactivated.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Timestamp, ValidationError};

use super::credentials::{Email, NationalId, PasswordHash, Username};

/// Payment state recorded on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountPaymentStatus {
    #[default]
    None,
    Approved,
}

impl AccountPaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountPaymentStatus::None => "none",
            AccountPaymentStatus::Approved => "approved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(AccountPaymentStatus::None),
            "approved" => Some(AccountPaymentStatus::Approved),
            _ => None,
        }
    }
}

/// Result of asking an account to become active.
///
/// `Activated` and `AlreadyActive` are both success; the distinction is
/// kept for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated,
    AlreadyActive,
    AccountNotFound,
}

/// Raw field set used to rebuild an account from storage.
#[derive(Debug, Clone)]
pub struct AccountParts {
    pub id: AccountId,
    pub username: Username,
    pub email: Email,
    pub national_id: NationalId,
    pub password_hash: PasswordHash,
    pub is_active: bool,
    pub payment_status: AccountPaymentStatus,
    pub activated_at: Option<Timestamp>,
    pub last_payment_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Account holder ("manager") aggregate.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    username: Username,
    email: Email,
    national_id: NationalId,
    password_hash: PasswordHash,
    is_active: bool,
    payment_status: AccountPaymentStatus,
    activated_at: Option<Timestamp>,
    last_payment_at: Option<Timestamp>,
    created_at: Timestamp,
}

impl Account {
    /// Creates a new pending account awaiting payment.
    pub fn register(
        username: Username,
        email: Email,
        national_id: NationalId,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id: AccountId::new(),
            username,
            email,
            national_id,
            password_hash,
            is_active: false,
            payment_status: AccountPaymentStatus::None,
            activated_at: None,
            last_payment_at: None,
            created_at: Timestamp::now(),
        }
    }

    /// Rebuilds an account from stored fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the stored state claims to be active
    /// without an approved payment and an activation time.
    pub fn from_parts(parts: AccountParts) -> Result<Self, ValidationError> {
        if parts.is_active
            && (parts.payment_status != AccountPaymentStatus::Approved
                || parts.activated_at.is_none())
        {
            return Err(ValidationError::invalid_format(
                "isActive",
                "active account without approved payment",
            ));
        }

        Ok(Self {
            id: parts.id,
            username: parts.username,
            email: parts.email,
            national_id: parts.national_id,
            password_hash: parts.password_hash,
            is_active: parts.is_active,
            payment_status: parts.payment_status,
            activated_at: parts.activated_at,
            last_payment_at: parts.last_payment_at,
            created_at: parts.created_at,
        })
    }

    /// Marks the account active with an approved payment at `at`.
    ///
    /// Already active accounts are left untouched, so `activated_at`
    /// never moves once set.
    pub fn activate(&mut self, at: Timestamp) -> ActivationOutcome {
        if self.is_active {
            return ActivationOutcome::AlreadyActive;
        }
        self.is_active = true;
        self.payment_status = AccountPaymentStatus::Approved;
        self.activated_at = Some(at);
        self.last_payment_at = Some(at);
        ActivationOutcome::Activated
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn payment_status(&self) -> AccountPaymentStatus {
        self.payment_status
    }

    pub fn activated_at(&self) -> Option<Timestamp> {
        self.activated_at
    }

    pub fn last_payment_at(&self) -> Option<Timestamp> {
        self.last_payment_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Minimal projection used by the signup wizard's existence checks.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            username: self.username.as_str().to_string(),
            email: self.email.as_str().to_string(),
            is_active: self.is_active,
        }
    }
}

/// Id, username, email and activation flag of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}
