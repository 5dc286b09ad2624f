//! HTTP adapter for contact inquiries.
//!
//! - `POST /contacts` - Public contact form
//! - `GET /contacts` - Filtered listing (`status`, `company`, `from`, `to`)
//! - `GET /contacts/stats` - Total and pending counts
//! - `GET /contacts/:id` - Single contact
//! - `PATCH /contacts/:id/status` - Triage status change
//! - `DELETE /contacts/:id` - Remove a contact

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ContactApiError, ContactAppState};
pub use routes::contact_router;
