//! VerifyAccountHandler - Existence checks used by the signup wizard.
//!
//! Inputs are normalized but not validated, so a malformed email simply
//! reports "not found" instead of an error.

use std::sync::Arc;

use crate::domain::account::{normalize_email, normalize_username, AccountError, AccountSummary};
use crate::ports::AccountRepository;

/// Which unique field to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountLookup {
    ByEmail(String),
    ByUsername(String),
}

/// Result of an existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyAccountResult {
    pub exists: bool,
    pub account: Option<AccountSummary>,
}

pub struct VerifyAccountHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl VerifyAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, lookup: AccountLookup) -> Result<VerifyAccountResult, AccountError> {
        let found = match &lookup {
            AccountLookup::ByEmail(raw) => {
                self.accounts.find_by_email(&normalize_email(raw)).await?
            }
            AccountLookup::ByUsername(raw) => {
                self.accounts
                    .find_by_username(&normalize_username(raw))
                    .await?
            }
        };

        let account = found.map(|a| a.summary());
        Ok(VerifyAccountResult {
            exists: account.is_some(),
            account,
        })
    }

    /// Like [`handle`](Self::handle) by email, but absence is an error.
    pub async fn find_by_email(&self, raw: &str) -> Result<AccountSummary, AccountError> {
        self.handle(AccountLookup::ByEmail(raw.to_string()))
            .await?
            .account
            .ok_or_else(|| AccountError::not_found(normalize_email(raw)))
    }
}
