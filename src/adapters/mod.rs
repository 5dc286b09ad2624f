//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum routers, DTOs and error mapping
//! - `memory` - in-memory repositories for tests and local runs
//! - `mercadopago` - payment gateway client and webhook signatures
//! - `postgres` - sqlx repositories and migrations
//! - `security` - credential hashing

pub mod http;
pub mod memory;
pub mod mercadopago;
pub mod postgres;
pub mod security;
