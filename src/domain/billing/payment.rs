//! Gateway-side payment and merchant order views.
//!
//! These are the ground truth the activation engine re-fetches; the
//! status fields of an incoming notification are never trusted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment status as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Approved,
    Pending,
    InProcess,
    Authorized,
    InMediation,
    Rejected,
    Cancelled,
    Refunded,
    ChargedBack,
    Other(String),
}

impl PaymentStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "approved" => PaymentStatus::Approved,
            "pending" => PaymentStatus::Pending,
            "in_process" => PaymentStatus::InProcess,
            "authorized" => PaymentStatus::Authorized,
            "in_mediation" => PaymentStatus::InMediation,
            "rejected" => PaymentStatus::Rejected,
            "cancelled" => PaymentStatus::Cancelled,
            "refunded" => PaymentStatus::Refunded,
            "charged_back" => PaymentStatus::ChargedBack,
            other => PaymentStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Approved => "approved",
            PaymentStatus::Pending => "pending",
            PaymentStatus::InProcess => "in_process",
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::InMediation => "in_mediation",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::ChargedBack => "charged_back",
            PaymentStatus::Other(s) => s,
        }
    }

    /// The only status that activates an account.
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentStatus::Approved)
    }

    /// Statuses the gateway may still move to `approved` shortly.
    pub fn may_still_approve(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Pending | PaymentStatus::InProcess | PaymentStatus::Authorized
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PaymentStatus::parse(&raw))
    }
}

/// A payment fetched from the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayPayment {
    pub id: String,
    pub status: PaymentStatus,
    pub status_detail: Option<String>,
    pub external_reference: Option<String>,
    pub transaction_amount: Option<f64>,
}

impl GatewayPayment {
    /// External reference with whitespace stripped, `None` when blank.
    pub fn account_reference(&self) -> Option<&str> {
        self.external_reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Payment entry listed on a merchant order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPayment {
    pub id: String,
    pub status: Option<PaymentStatus>,
}

/// Gateway aggregate that groups payment attempts for one preference.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantOrder {
    pub id: String,
    pub order_status: String,
    pub paid_amount: f64,
    pub total_amount: f64,
    pub payments: Vec<OrderPayment>,
}

impl MerchantOrder {
    /// An order represents a completed purchase only when it lists at least
    /// one payment, reports `paid`, and the paid amount covers the total.
    pub fn is_fully_paid(&self) -> bool {
        !self.payments.is_empty()
            && self.order_status == "paid"
            && self.paid_amount >= self.total_amount
    }
}
