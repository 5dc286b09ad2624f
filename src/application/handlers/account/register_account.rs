//! RegisterAccountHandler - Command handler for account signup.

use std::sync::Arc;

use crate::domain::account::{
    validate_credential, Account, AccountError, DuplicateField, Email, NationalId, Username,
};
use crate::ports::{AccountRepository, CredentialHasher};

/// Command to register a new pending account.
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub username: String,
    pub email: String,
    pub national_id: String,
    pub password: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterAccountResult {
    pub account: Account,
    /// Always true: the account stays inactive until a payment is approved.
    pub needs_payment: bool,
}

/// Handler for account registration.
///
/// Uniqueness is checked in priority order (username, email, national id)
/// so the caller learns about the most significant collision first. The
/// store's unique constraints back this up under concurrent signups.
pub struct RegisterAccountHandler {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl RegisterAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { accounts, hasher }
    }

    pub async fn handle(
        &self,
        cmd: RegisterAccountCommand,
    ) -> Result<RegisterAccountResult, AccountError> {
        // 1. Validate and normalize
        let username = Username::new(&cmd.username)?;
        let email = Email::new(&cmd.email)?;
        let national_id = NationalId::new(&cmd.national_id)?;
        validate_credential(&cmd.password)?;

        // 2. Uniqueness, first collision wins
        if self
            .accounts
            .find_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::duplicate(DuplicateField::Username));
        }
        if self.accounts.find_by_email(email.as_str()).await?.is_some() {
            return Err(AccountError::duplicate(DuplicateField::Email));
        }
        if self
            .accounts
            .find_by_national_id(national_id.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::duplicate(DuplicateField::NationalId));
        }

        // 3. Hash off the async runtime
        let hasher = Arc::clone(&self.hasher);
        let password = cmd.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::infrastructure(format!("hashing task failed: {}", e)))??;

        // 4. Persist; a racing signup surfaces here as a store duplicate
        let account = Account::register(username, email, national_id, password_hash);
        self.accounts.create(&account).await.map_err(|e| {
            let err = AccountError::from(e);
            if let AccountError::DuplicateField(field) = &err {
                tracing::info!(field = field.as_str(), "Duplicate rejected by store");
            }
            err
        })?;

        tracing::info!(
            account_id = %account.id(),
            username = %account.username(),
            "Account registered, awaiting payment"
        );

        Ok(RegisterAccountResult {
            account,
            needs_payment: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccountRepository;
    use crate::domain::account::PasswordHash;
    use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct PlainHasher;

    impl CredentialHasher for PlainHasher {
        fn hash(&self, plain: &str) -> Result<PasswordHash, DomainError> {
            Ok(PasswordHash::from_phc(format!("plain${}", plain)))
        }

        fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, DomainError> {
            Ok(hash.as_str() == format!("plain${}", plain))
        }
    }

    /// Store whose lookups never see the competing row, so only the insert
    /// detects the duplicate.
    struct RacingRepository {
        constraint: &'static str,
    }

    #[async_trait]
    impl AccountRepository for RacingRepository {
        async fn create(&self, _account: &Account) -> Result<(), DomainError> {
            Err(DomainError::duplicate_key(self.constraint))
        }
        async fn find_by_id(&self, _id: &AccountId) -> Result<Option<Account>, DomainError> {
            Ok(None)
        }
        async fn find_by_username(&self, _u: &str) -> Result<Option<Account>, DomainError> {
            Ok(None)
        }
        async fn find_by_email(&self, _e: &str) -> Result<Option<Account>, DomainError> {
            Ok(None)
        }
        async fn find_by_national_id(&self, _n: &str) -> Result<Option<Account>, DomainError> {
            Ok(None)
        }
        async fn list(&self) -> Result<Vec<Account>, DomainError> {
            Ok(Vec::new())
        }
        async fn activate_if_inactive(
            &self,
            _id: &AccountId,
            _at: Timestamp,
        ) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(repo: Arc<dyn AccountRepository>) -> RegisterAccountHandler {
        RegisterAccountHandler::new(repo, Arc::new(PlainHasher))
    }

    fn joao() -> RegisterAccountCommand {
        RegisterAccountCommand {
            username: "joao".to_string(),
            email: "joao@x.com".to_string(),
            national_id: "529.982.247-25".to_string(),
            password: "segredo1".to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn registers_inactive_account_with_normalized_fields() {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let result = handler(repo.clone())
            .handle(RegisterAccountCommand {
                email: "  JOAO@X.com ".to_string(),
                ..joao()
            })
            .await
            .unwrap();

        assert!(result.needs_payment);
        assert!(!result.account.is_active());
        assert_eq!(result.account.email().as_str(), "joao@x.com");
        assert_eq!(result.account.national_id().as_str(), "52998224725");
        assert_eq!(result.account.password_hash().as_str(), "plain$segredo1");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn username_collision_reported_before_email() {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let h = handler(repo.clone());
        h.handle(joao()).await.unwrap();

        // Same username and same email: username wins.
        let err = h.handle(joao()).await.unwrap_err();
        assert_eq!(err, AccountError::DuplicateField(DuplicateField::Username));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn email_collision_reported_before_national_id() {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let h = handler(repo.clone());
        h.handle(joao()).await.unwrap();

        let err = h
            .handle(RegisterAccountCommand {
                username: "maria".to_string(),
                email: "JOAO@x.com".to_string(),
                ..joao()
            })
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::DuplicateField(DuplicateField::Email));
    }

    #[tokio::test]
    async fn national_id_collision_detected_after_normalization() {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let h = handler(repo.clone());
        h.handle(joao()).await.unwrap();

        let err = h
            .handle(RegisterAccountCommand {
                username: "maria".to_string(),
                email: "maria@x.com".to_string(),
                national_id: "52998224725".to_string(),
                ..joao()
            })
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::DuplicateField(DuplicateField::NationalId));
    }

    #[tokio::test]
    async fn store_race_becomes_duplicate_field() {
        let h = handler(Arc::new(RacingRepository {
            constraint: "accounts_email_key",
        }));
        let err = h.handle(joao()).await.unwrap_err();
        assert_eq!(err, AccountError::DuplicateField(DuplicateField::Email));
    }

    #[tokio::test]
    async fn missing_fields_are_validation_errors() {
        let h = handler(Arc::new(InMemoryAccountRepository::new()));

        let err = h
            .handle(RegisterAccountCommand {
                username: "   ".to_string(),
                ..joao()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::ValidationFailed { ref field, .. } if field == "username"));

        let err = h
            .handle(RegisterAccountCommand {
                password: String::new(),
                ..joao()
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err, AccountError::ValidationFailed { ref field, .. } if field == "passwordCredential")
        );
    }

    #[tokio::test]
    async fn invalid_cpf_is_rejected() {
        let h = handler(Arc::new(InMemoryAccountRepository::new()));
        let err = h
            .handle(RegisterAccountCommand {
                national_id: "12345678900".to_string(),
                ..joao()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
