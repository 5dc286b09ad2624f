//! Contact repository port.

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactFilter, ContactStatus};
use crate::domain::foundation::{ContactId, DomainError};

/// Persistence port for contact inquiries.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, contact: &Contact) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, DomainError>;

    /// Contacts matching `filter`, most recent first.
    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, DomainError>;

    /// # Errors
    ///
    /// - `ContactNotFound` if the contact doesn't exist
    async fn update_status(&self, id: &ContactId, status: ContactStatus)
        -> Result<(), DomainError>;

    /// Returns whether a contact was deleted.
    async fn delete(&self, id: &ContactId) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    async fn count_by_status(&self, status: ContactStatus) -> Result<u64, DomainError>;
}
