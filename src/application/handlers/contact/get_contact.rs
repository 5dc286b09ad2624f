//! GetContactHandler - Query handler for a single contact.

use std::sync::Arc;

use crate::domain::contact::{Contact, ContactError};
use crate::ports::ContactRepository;

use super::parse_contact_id;

pub struct GetContactHandler {
    contacts: Arc<dyn ContactRepository>,
}

impl GetContactHandler {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn handle(&self, id: &str) -> Result<Contact, ContactError> {
        let id = parse_contact_id(id)?;
        self.contacts
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ContactError::not_found(id.to_string()))
    }
}
