//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machine)
//! - `account` - Account holders and their one-way activation
//! - `billing` - Plans, checkout preferences, gateway payments, notifications
//! - `subscription` - Plan purchase records
//! - `contact` - Public contact form inquiries

pub mod account;
pub mod billing;
pub mod contact;
pub mod foundation;
pub mod subscription;
