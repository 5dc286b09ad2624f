//! Contact inquiry handlers.
//!
//! Public form submission plus the back-office triage operations.

mod contact_stats;
mod delete_contact;
mod get_contact;
mod list_contacts;
mod submit_contact;
mod update_contact_status;

pub use contact_stats::{ContactStats, ContactStatsHandler};
pub use delete_contact::DeleteContactHandler;
pub use get_contact::GetContactHandler;
pub use list_contacts::{ListContactsHandler, ListContactsQuery};
pub use submit_contact::{SubmitContactCommand, SubmitContactHandler};
pub use update_contact_status::{UpdateContactStatusCommand, UpdateContactStatusHandler};

use crate::domain::contact::ContactError;
use crate::domain::foundation::ContactId;

fn parse_contact_id(raw: &str) -> Result<ContactId, ContactError> {
    raw.parse()
        .map_err(|_| ContactError::InvalidId(raw.trim().to_string()))
}
