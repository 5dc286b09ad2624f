//! ContactStatsHandler - Query handler for inbox counters.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::contact::{ContactError, ContactStatus};
use crate::ports::ContactRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: u64,
    pub pending: u64,
}

pub struct ContactStatsHandler {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactStatsHandler {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn handle(&self) -> Result<ContactStats, ContactError> {
        let total = self.contacts.count().await?;
        let pending = self.contacts.count_by_status(ContactStatus::Pending).await?;
        Ok(ContactStats { total, pending })
    }
}
