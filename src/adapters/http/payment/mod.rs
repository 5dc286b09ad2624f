//! HTTP adapter for payment endpoints.
//!
//! - `POST /payments/create-preference` - Checkout for a fresh signup
//! - `POST /payments/create-existing` - Checkout for an unpaid existing account
//! - `POST /payments/check-payment` - Read-only payment status

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{CheckoutApiError, PaymentAppState};
pub use routes::payment_router;
