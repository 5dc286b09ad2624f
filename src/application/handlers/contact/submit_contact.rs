//! SubmitContactHandler - Command handler for the public contact form.

use std::sync::Arc;

use crate::domain::contact::{Contact, ContactError, NewContact};
use crate::domain::foundation::Timestamp;
use crate::ports::ContactRepository;

/// Raw contact form fields.
#[derive(Debug, Clone, Default)]
pub struct SubmitContactCommand {
    pub name: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub accepted_terms: bool,
    pub accepted_news: bool,
}

pub struct SubmitContactHandler {
    contacts: Arc<dyn ContactRepository>,
}

impl SubmitContactHandler {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn handle(&self, cmd: SubmitContactCommand) -> Result<Contact, ContactError> {
        let contact = Contact::create(
            NewContact {
                name: cmd.name,
                phone: cmd.phone,
                company: cmd.company,
                message: cmd.message,
                accepted_terms: cmd.accepted_terms,
                accepted_news: cmd.accepted_news,
            },
            Timestamp::now(),
        )?;

        self.contacts.create(&contact).await?;
        tracing::info!(contact_id = %contact.id, company = %contact.company, "Contact received");

        Ok(contact)
    }
}
