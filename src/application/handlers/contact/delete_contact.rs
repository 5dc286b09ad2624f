//! DeleteContactHandler - Command handler for removing a contact.

use std::sync::Arc;

use crate::domain::contact::ContactError;
use crate::ports::ContactRepository;

use super::parse_contact_id;

pub struct DeleteContactHandler {
    contacts: Arc<dyn ContactRepository>,
}

impl DeleteContactHandler {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn handle(&self, id: &str) -> Result<(), ContactError> {
        let id = parse_contact_id(id)?;
        if !self.contacts.delete(&id).await? {
            return Err(ContactError::not_found(id.to_string()));
        }
        tracing::info!(contact_id = %id, "Contact deleted");
        Ok(())
    }
}
