//! Route configuration for contact endpoints.

use axum::routing::{get, patch};
use axum::Router;

use super::handlers::{
    contact_stats, delete_contact, get_contact, list_contacts, submit_contact,
    update_contact_status, ContactAppState,
};

pub fn contact_router() -> Router<ContactAppState> {
    Router::new()
        .route("/contacts", get(list_contacts).post(submit_contact))
        .route("/contacts/stats", get(contact_stats))
        .route("/contacts/:id", get(get_contact).delete(delete_contact))
        .route("/contacts/:id/status", patch(update_contact_status))
}
