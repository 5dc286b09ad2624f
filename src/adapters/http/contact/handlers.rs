//! HTTP handlers for contact endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::contact::{
    ContactStatsHandler, DeleteContactHandler, GetContactHandler, ListContactsHandler,
    ListContactsQuery, SubmitContactCommand, SubmitContactHandler, UpdateContactStatusCommand,
    UpdateContactStatusHandler,
};
use crate::domain::contact::ContactError;
use crate::ports::ContactRepository;

use super::super::error::ErrorResponse;
use super::super::extract::JsonBody;
use super::dto::{
    ContactDataResponse, ContactDeletedResponse, ContactListParams, ContactListResponse,
    ContactReceipt, ContactResponse, ContactStatsResponse, SubmitContactRequest,
    SubmitContactResponse, UpdateStatusRequest,
};

#[derive(Clone)]
pub struct ContactAppState {
    pub contacts: Arc<dyn ContactRepository>,
}

impl ContactAppState {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }
}

/// POST /contacts
pub async fn submit_contact(
    State(state): State<ContactAppState>,
    JsonBody(request): JsonBody<SubmitContactRequest>,
) -> Result<impl IntoResponse, ContactApiError> {
    let cmd = SubmitContactCommand {
        name: request.name,
        phone: request.phone,
        company: request.company,
        message: request.message,
        accepted_terms: request.accepted_terms,
        accepted_news: request.accepted_news,
    };

    let contact = SubmitContactHandler::new(state.contacts).handle(cmd).await?;

    let response = SubmitContactResponse {
        success: true,
        message: "Contact received".to_string(),
        data: ContactReceipt::from(&contact),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /contacts
pub async fn list_contacts(
    State(state): State<ContactAppState>,
    Query(params): Query<ContactListParams>,
) -> Result<impl IntoResponse, ContactApiError> {
    let query = ListContactsQuery {
        status: params.status,
        company: params.company,
        from: params.from,
        to: params.to,
    };

    let data: Vec<ContactResponse> = ListContactsHandler::new(state.contacts)
        .handle(query)
        .await?
        .into_iter()
        .map(ContactResponse::from)
        .collect();

    Ok(Json(ContactListResponse {
        success: true,
        total: data.len(),
        data,
    }))
}

/// GET /contacts/stats
pub async fn contact_stats(
    State(state): State<ContactAppState>,
) -> Result<impl IntoResponse, ContactApiError> {
    let data = ContactStatsHandler::new(state.contacts).handle().await?;
    Ok(Json(ContactStatsResponse {
        success: true,
        data,
    }))
}

/// GET /contacts/:id
pub async fn get_contact(
    State(state): State<ContactAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ContactApiError> {
    let contact = GetContactHandler::new(state.contacts).handle(&id).await?;
    Ok(Json(ContactDataResponse {
        success: true,
        message: None,
        data: contact.into(),
    }))
}

/// PATCH /contacts/:id/status
pub async fn update_contact_status(
    State(state): State<ContactAppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ContactApiError> {
    let cmd = UpdateContactStatusCommand {
        contact_id: id,
        status: request.status,
    };
    let contact = UpdateContactStatusHandler::new(state.contacts)
        .handle(cmd)
        .await?;

    Ok(Json(ContactDataResponse {
        success: true,
        message: Some("Status updated".to_string()),
        data: contact.into(),
    }))
}

/// DELETE /contacts/:id
pub async fn delete_contact(
    State(state): State<ContactAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ContactApiError> {
    DeleteContactHandler::new(state.contacts).handle(&id).await?;
    Ok(Json(ContactDeletedResponse {
        success: true,
        message: "Contact deleted".to_string(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct ContactApiError(pub ContactError);

impl From<ContactError> for ContactApiError {
    fn from(err: ContactError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ContactApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            ContactError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            ContactError::TermsNotAccepted => (StatusCode::BAD_REQUEST, "TERMS_NOT_ACCEPTED"),
            ContactError::InvalidId(_) => (StatusCode::BAD_REQUEST, "INVALID_ID"),
            ContactError::InvalidTransition { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_STATE_TRANSITION")
            }
            ContactError::NotFound(_) => (StatusCode::NOT_FOUND, "CONTACT_NOT_FOUND"),
            ContactError::Infrastructure(_) => {
                tracing::error!(error = %self.0, "Contact request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
