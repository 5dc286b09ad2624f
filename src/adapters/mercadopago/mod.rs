//! Mercado Pago payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Mercado Pago, including:
//! - Checkout preference creation
//! - Payment and merchant order lookups
//! - Optional webhook signature verification
//!
//! # Security
//!
//! - The access token and webhook secret are held in `secrecy::SecretString`
//! - Signatures use HMAC-SHA256 with constant-time comparison

mod mercadopago_adapter;
mod mock_payment_gateway;
mod signature;
mod wire_types;

pub use mercadopago_adapter::{MercadoPagoAdapter, MercadoPagoConfig};
pub use mock_payment_gateway::{MethodCall, MockPaymentGateway};
pub use signature::{manifest, SignatureError, SignatureHeader, WebhookVerifier};
