//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::account::{
    AccountLookup, ListAccountsHandler, RegisterAccountCommand, RegisterAccountHandler,
    VerifyAccountHandler,
};
use crate::domain::account::AccountError;
use crate::ports::{AccountRepository, CredentialHasher};

use super::super::error::ErrorResponse;
use super::super::extract::JsonBody;
use super::dto::{
    FindByEmailResponse, RegisterAccountRequest, RegisterAccountResponse, VerifyAccountResponse,
    VerifyEmailRequest, VerifyUsernameRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AccountAppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub hasher: Arc<dyn CredentialHasher>,
}

impl AccountAppState {
    pub fn new(accounts: Arc<dyn AccountRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { accounts, hasher }
    }

    pub fn register_handler(&self) -> RegisterAccountHandler {
        RegisterAccountHandler::new(self.accounts.clone(), self.hasher.clone())
    }

    pub fn list_handler(&self) -> ListAccountsHandler {
        ListAccountsHandler::new(self.accounts.clone())
    }

    pub fn verify_handler(&self) -> VerifyAccountHandler {
        VerifyAccountHandler::new(self.accounts.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /accounts/register
pub async fn register_account(
    State(state): State<AccountAppState>,
    JsonBody(request): JsonBody<RegisterAccountRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let cmd = RegisterAccountCommand {
        username: request.username,
        email: request.email,
        national_id: request.national_id,
        password: request.password_credential,
    };

    let result = state.register_handler().handle(cmd).await?;

    let response = RegisterAccountResponse {
        account: result.account.summary(),
        needs_payment: result.needs_payment,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /accounts
pub async fn list_accounts(
    State(state): State<AccountAppState>,
) -> Result<impl IntoResponse, AccountApiError> {
    let accounts = state.list_handler().handle().await?;
    Ok(Json(accounts))
}

/// POST /accounts/verify-email
pub async fn verify_email(
    State(state): State<AccountAppState>,
    JsonBody(request): JsonBody<VerifyEmailRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let email = required(request.email, "email")?;
    let result = state
        .verify_handler()
        .handle(AccountLookup::ByEmail(email))
        .await?;

    Ok(Json(VerifyAccountResponse {
        existe: result.exists,
        gestor: result.account,
    }))
}

/// POST /accounts/verify-username
pub async fn verify_username(
    State(state): State<AccountAppState>,
    JsonBody(request): JsonBody<VerifyUsernameRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let username = required(request.username, "username")?;
    let result = state
        .verify_handler()
        .handle(AccountLookup::ByUsername(username))
        .await?;

    Ok(Json(VerifyAccountResponse {
        existe: result.exists,
        gestor: result.account,
    }))
}

/// POST /accounts/find-by-email
pub async fn find_by_email(
    State(state): State<AccountAppState>,
    JsonBody(request): JsonBody<VerifyEmailRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let email = required(request.email, "email")?;
    let gestor = state.verify_handler().find_by_email(&email).await?;
    Ok(Json(FindByEmailResponse { gestor }))
}

fn required(value: Option<String>, field: &str) -> Result<String, AccountError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AccountError::validation(field, "is required"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Converts account, checkout and subscription errors to HTTP responses.
#[derive(Debug)]
pub struct AccountApiError(pub AccountError);

impl From<AccountError> for AccountApiError {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl AccountApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AccountError::ValidationFailed { .. }
            | AccountError::InvalidPlan(_)
            | AccountError::DuplicateField(_) => StatusCode::BAD_REQUEST,
            AccountError::NotFound(_) | AccountError::SubscriptionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AccountError::CheckoutUrlMissing
            | AccountError::Gateway { .. }
            | AccountError::Configuration(_)
            | AccountError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Account request failed");
        }

        let message = self.0.message();
        let body = match &self.0 {
            AccountError::DuplicateField(field) => ErrorResponse::with_details(
                "DUPLICATE_FIELD",
                message,
                serde_json::json!({ "field": field.as_str() }),
            ),
            AccountError::ValidationFailed { field, .. } => ErrorResponse::with_details(
                "VALIDATION_FAILED",
                message,
                serde_json::json!({ "field": field }),
            ),
            AccountError::InvalidPlan(_) => ErrorResponse::new("INVALID_PLAN", message),
            AccountError::Gateway { details } => ErrorResponse::with_details(
                "GATEWAY_ERROR",
                message,
                serde_json::json!({ "details": details }),
            ),
            other => ErrorResponse::new(other.code().to_string(), message),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::DuplicateField;

    #[test]
    fn duplicates_are_bad_requests_naming_the_field() {
        let err = AccountApiError(AccountError::duplicate(DuplicateField::NationalId));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_records_are_not_found() {
        assert_eq!(
            AccountApiError(AccountError::not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AccountApiError(AccountError::SubscriptionNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn gateway_failures_are_server_errors() {
        assert_eq!(
            AccountApiError(AccountError::gateway("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AccountApiError(AccountError::CheckoutUrlMissing).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn blank_required_values_are_rejected() {
        assert!(required(Some("  ".into()), "email").is_err());
        assert!(required(None, "email").is_err());
        assert_eq!(required(Some("a@b.co".into()), "email").unwrap(), "a@b.co");
    }
}
