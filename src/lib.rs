//! PremiX signup backend
//!
//! Account registration, Mercado Pago checkout, and webhook-driven account
//! activation, plus the subscription and contact-inquiry APIs that support
//! the marketing site.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
