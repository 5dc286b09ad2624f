//! In-memory contact repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::contact::{Contact, ContactFilter, ContactStatus};
use crate::domain::foundation::{ContactId, DomainError, ErrorCode};
use crate::ports::ContactRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryContactRepository {
    contacts: Arc<RwLock<HashMap<ContactId, Contact>>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, contact: &Contact) -> Result<(), DomainError> {
        self.contacts
            .write()
            .await
            .insert(contact.id, contact.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, DomainError> {
        Ok(self.contacts.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, DomainError> {
        let mut found: Vec<Contact> = self
            .contacts
            .read()
            .await
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(found)
    }

    async fn update_status(
        &self,
        id: &ContactId,
        status: ContactStatus,
    ) -> Result<(), DomainError> {
        match self.contacts.write().await.get_mut(id) {
            Some(contact) => {
                contact.status = status;
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::ContactNotFound, id.to_string())),
        }
    }

    async fn delete(&self, id: &ContactId) -> Result<bool, DomainError> {
        Ok(self.contacts.write().await.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.contacts.read().await.len() as u64)
    }

    async fn count_by_status(&self, status: ContactStatus) -> Result<u64, DomainError> {
        Ok(self
            .contacts
            .read()
            .await
            .values()
            .filter(|c| c.status == status)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::NewContact;
    use crate::domain::foundation::Timestamp;

    fn contact(company: &str, sent_at: Timestamp) -> Contact {
        Contact::create(
            NewContact {
                name: "Maria".to_string(),
                phone: "(11) 99999-9999".to_string(),
                company: company.to_string(),
                message: "Olá".to_string(),
                accepted_terms: true,
                accepted_news: false,
            },
            sent_at,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_sorts_most_recent_first_and_filters() {
        let repo = InMemoryContactRepository::new();
        let now = Timestamp::now();
        let old = contact("Acme", now.add_days(-2));
        let new = contact("Premix", now);
        repo.create(&old).await.unwrap();
        repo.create(&new).await.unwrap();

        let all = repo.list(&ContactFilter::default()).await.unwrap();
        assert_eq!(all[0].id, new.id);

        let filtered = repo
            .list(&ContactFilter {
                company: Some("acme".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, old.id);
    }

    #[tokio::test]
    async fn counts_by_status() {
        let repo = InMemoryContactRepository::new();
        let a = contact("A", Timestamp::now());
        let b = contact("B", Timestamp::now());
        repo.create(&a).await.unwrap();
        repo.create(&b).await.unwrap();
        repo.update_status(&a.id, ContactStatus::Read).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.count_by_status(ContactStatus::Pending).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let repo = InMemoryContactRepository::new();
        let a = contact("A", Timestamp::now());
        repo.create(&a).await.unwrap();

        assert!(repo.delete(&a.id).await.unwrap());
        assert!(!repo.delete(&a.id).await.unwrap());
    }
}
