//! PostgreSQL implementation of ContactRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::contact::{Contact, ContactFilter, ContactStatus};
use crate::domain::foundation::{ContactId, DomainError, ErrorCode, Timestamp};
use crate::ports::ContactRepository;

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    phone: String,
    company: String,
    message: String,
    accepted_terms: bool,
    accepted_news: bool,
    sent_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<ContactRow> for Contact {
    type Error = DomainError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let status = ContactStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", row.status),
            )
        })?;

        Ok(Contact {
            id: ContactId::from_uuid(row.id),
            name: row.name,
            phone: row.phone,
            company: row.company,
            message: row.message,
            accepted_terms: row.accepted_terms,
            accepted_news: row.accepted_news,
            sent_at: Timestamp::from_datetime(row.sent_at),
            status,
        })
    }
}

/// Appends the WHERE clause for `filter`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ContactFilter) {
    builder.push(" WHERE TRUE");
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(company) = filter.company.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        builder
            .push(" AND company ILIKE ")
            .push_bind(format!("%{}%", company));
    }
    if let Some(from) = filter.from {
        builder.push(" AND sent_at >= ").push_bind(*from.as_datetime());
    }
    if let Some(to) = filter.to {
        builder.push(" AND sent_at <= ").push_bind(*to.as_datetime());
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, contact: &Contact) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contacts (
                id, name, phone, company, message, accepted_terms, accepted_news, sent_at, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(contact.id.as_uuid())
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.company)
        .bind(&contact.message)
        .bind(contact.accepted_terms)
        .bind(contact.accepted_news)
        .bind(contact.sent_at.as_datetime())
        .bind(contact.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save contact: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, DomainError> {
        let row: Option<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, name, phone, company, message, accepted_terms, accepted_news, sent_at, status
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find contact: {}", e)))?;

        row.map(Contact::try_from).transpose()
    }

    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, name, phone, company, message, accepted_terms, accepted_news, sent_at, status FROM contacts",
        );
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY sent_at DESC");

        let rows: Vec<ContactRow> = builder
            .build_query_as::<ContactRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to list contacts: {}", e)))?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    async fn update_status(
        &self,
        id: &ContactId,
        status: ContactStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE contacts SET status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update contact: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ContactNotFound, id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &ContactId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete contact: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count contacts: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn count_by_status(&self, status: ContactStatus) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count contacts: {}", e)))?;

        Ok(count.max(0) as u64)
    }
}
