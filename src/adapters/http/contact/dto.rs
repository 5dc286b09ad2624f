//! Request and response bodies for contact endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::contact::ContactStats;
use crate::domain::contact::{Contact, ContactStatus};
use crate::domain::foundation::{ContactId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Contact form body. Portuguese field names from the landing page are
/// accepted too.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitContactRequest {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "telefone")]
    pub phone: String,
    #[serde(alias = "empresa")]
    pub company: String,
    #[serde(alias = "mensagem")]
    pub message: String,
    #[serde(alias = "aceitouTermos")]
    pub accepted_terms: bool,
    #[serde(alias = "aceitouNovidades")]
    pub accepted_news: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListParams {
    pub status: Option<String>,
    #[serde(alias = "empresa")]
    pub company: Option<String>,
    #[serde(alias = "dataInicio")]
    pub from: Option<String>,
    #[serde(alias = "dataFim")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub accepted_terms: bool,
    pub accepted_news: bool,
    pub sent_at: Timestamp,
    pub status: ContactStatus,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
            company: c.company,
            message: c.message,
            accepted_terms: c.accepted_terms,
            accepted_news: c.accepted_news,
            sent_at: c.sent_at,
            status: c.status,
        }
    }
}

/// Short receipt returned to the public form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub id: ContactId,
    pub name: String,
    pub company: String,
    pub sent_at: Timestamp,
}

impl From<&Contact> for ContactReceipt {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            company: c.company.clone(),
            sent_at: c.sent_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitContactResponse {
    pub success: bool,
    pub message: String,
    pub data: ContactReceipt,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactListResponse {
    pub success: bool,
    pub total: usize,
    pub data: Vec<ContactResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDataResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: ContactResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactStatsResponse {
    pub success: bool,
    pub data: ContactStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDeletedResponse {
    pub success: bool,
    pub message: String,
}
