//! Contact inquiry domain module.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Contact, ContactFilter, NewContact};
pub use errors::ContactError;
pub use status::ContactStatus;
