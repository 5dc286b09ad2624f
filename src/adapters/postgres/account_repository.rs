//! PostgreSQL implementation of AccountRepository.
//!
//! Uniqueness of username, email and national id is enforced by named
//! constraints; violations come back as `DuplicateKey` with the offending
//! field in the `field` detail. Activation is a single conditional UPDATE.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{
    Account, AccountParts, AccountPaymentStatus, DuplicateField, Email, NationalId, PasswordHash,
    Username,
};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::ports::AccountRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, username, email, national_id, password_hash, is_active,
           payment_status, activated_at, last_payment_at, created_at
    FROM accounts
"#;

/// PostgreSQL implementation of the AccountRepository port.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Account>, DomainError> {
        let sql = format!("{} WHERE {} = $1", SELECT_COLUMNS, column);
        let row: Option<AccountRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find account", e))?;

        row.map(Account::try_from).transpose()
    }
}

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    national_id: String,
    password_hash: String,
    is_active: bool,
    payment_status: String,
    activated_at: Option<DateTime<Utc>>,
    last_payment_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let invalid = |e: crate::domain::foundation::ValidationError| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored account {}: {}", row.id, e),
            )
        };

        let payment_status = AccountPaymentStatus::parse(&row.payment_status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid payment_status value: {}", row.payment_status),
            )
        })?;

        Account::from_parts(AccountParts {
            id: AccountId::from_uuid(row.id),
            username: Username::new(&row.username).map_err(invalid)?,
            email: Email::new(&row.email).map_err(invalid)?,
            national_id: NationalId::new(&row.national_id).map_err(invalid)?,
            password_hash: PasswordHash::from_phc(row.password_hash.clone()),
            is_active: row.is_active,
            payment_status,
            activated_at: row.activated_at.map(Timestamp::from_datetime),
            last_payment_at: row.last_payment_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
        .map_err(invalid)
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, username, email, national_id, password_hash, is_active,
                payment_status, activated_at, last_payment_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.username().as_str())
        .bind(account.email().as_str())
        .bind(account.national_id().as_str())
        .bind(account.password_hash().as_str())
        .bind(account.is_active())
        .bind(account.payment_status().as_str())
        .bind(account.activated_at().map(|t| *t.as_datetime()))
        .bind(account.last_payment_at().map(|t| *t.as_datetime()))
        .bind(account.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if let Some(field) = db_err.constraint().and_then(DuplicateField::from_store_name) {
                    return DomainError::duplicate_key(field.as_str());
                }
            }
            db_error("Failed to save account", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row: Option<AccountRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find account", e))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<Account>, DomainError> {
        self.find_one("national_id", national_id).await
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let sql = format!("{} ORDER BY created_at ASC", SELECT_COLUMNS);
        let rows: Vec<AccountRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list accounts", e))?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn activate_if_inactive(
        &self,
        id: &AccountId,
        at: Timestamp,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                is_active = TRUE,
                payment_status = 'approved',
                activated_at = $2,
                last_payment_at = $2
            WHERE id = $1 AND is_active = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to activate account", e))?;

        Ok(result.rows_affected())
    }
}
