//! UpdateContactStatusHandler - Command handler for contact triage.

use std::sync::Arc;

use crate::domain::contact::{Contact, ContactError, ContactStatus};
use crate::ports::ContactRepository;

use super::parse_contact_id;

#[derive(Debug, Clone)]
pub struct UpdateContactStatusCommand {
    pub contact_id: String,
    pub status: String,
}

/// Moves a contact along pending → read → responded.
pub struct UpdateContactStatusHandler {
    contacts: Arc<dyn ContactRepository>,
}

impl UpdateContactStatusHandler {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn handle(&self, cmd: UpdateContactStatusCommand) -> Result<Contact, ContactError> {
        let id = parse_contact_id(&cmd.contact_id)?;
        let target = ContactStatus::parse(&cmd.status)
            .ok_or_else(|| ContactError::validation("status", "is not a known status"))?;

        let mut contact = self
            .contacts
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ContactError::not_found(id.to_string()))?;

        contact.change_status(target)?;
        self.contacts.update_status(&id, contact.status).await?;

        tracing::info!(contact_id = %id, status = contact.status.as_str(), "Contact status updated");
        Ok(contact)
    }
}
