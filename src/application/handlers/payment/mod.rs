//! Payment handlers.
//!
//! Checkout preference creation for new and existing accounts, and a
//! read-only payment status lookup.

mod check_payment;
mod create_checkout;

pub use check_payment::CheckPaymentHandler;
pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
