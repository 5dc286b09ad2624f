//! Request and response bodies for account endpoints.
//!
//! Requests accept the English camelCase names and the Portuguese names
//! used by the signup wizard (`usuario`, `cpf`, `senha`).

use serde::{Deserialize, Serialize};

use crate::domain::account::AccountSummary;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterAccountRequest {
    #[serde(alias = "usuario")]
    pub username: String,
    pub email: String,
    #[serde(alias = "cpf", alias = "national_id")]
    pub national_id: String,
    #[serde(alias = "senha", alias = "password")]
    pub password_credential: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyEmailRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyUsernameRequest {
    #[serde(alias = "usuario")]
    pub username: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountResponse {
    pub account: AccountSummary,
    pub needs_payment: bool,
}

/// Existence check result, keyed the way the signup wizard reads it.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyAccountResponse {
    pub existe: bool,
    pub gestor: Option<AccountSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindByEmailResponse {
    pub gestor: AccountSummary,
}
