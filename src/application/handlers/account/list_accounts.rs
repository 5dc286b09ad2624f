//! ListAccountsHandler - Query handler for the account listing.

use std::sync::Arc;

use crate::domain::account::{AccountError, AccountSummary};
use crate::ports::AccountRepository;

/// Returns every account as a public summary, oldest first.
pub struct ListAccountsHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl ListAccountsHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self) -> Result<Vec<AccountSummary>, AccountError> {
        let mut accounts = self.accounts.list().await?;
        accounts.sort_by_key(|a| a.created_at());
        Ok(accounts.iter().map(|a| a.summary()).collect())
    }
}
