//! Subscription plans with their fixed price and duration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription plan.
///
/// Prices are in BRL cents to keep the table exact. `Light` is recorded on
/// subscriptions only and has no checkout price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Single-unit plan.
    Unitario,
    /// Monthly plan registered without checkout.
    Light,
    /// Entry monthly plan.
    Basico,
    /// Semiannual plan.
    Premium,
    /// Annual plan for companies ("empresarial").
    Enterprise,
}

impl Plan {
    /// All plans.
    pub const ALL: [Plan; 5] = [
        Plan::Unitario,
        Plan::Light,
        Plan::Basico,
        Plan::Premium,
        Plan::Enterprise,
    ];

    /// Parses a plan name, case-insensitive and trimmed.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "unitario" => Some(Plan::Unitario),
            "light" => Some(Plan::Light),
            "basico" => Some(Plan::Basico),
            "premium" => Some(Plan::Premium),
            "enterprise" | "empresarial" => Some(Plan::Enterprise),
            _ => None,
        }
    }

    /// Parses a plan that can be bought through checkout.
    pub fn parse_purchasable(raw: &str) -> Option<Self> {
        Self::parse(raw).filter(Plan::is_purchasable)
    }

    pub fn is_purchasable(&self) -> bool {
        self.price_cents().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Unitario => "unitario",
            Plan::Light => "light",
            Plan::Basico => "basico",
            Plan::Premium => "premium",
            Plan::Enterprise => "enterprise",
        }
    }

    /// Unit price in cents. `None` for plans without checkout.
    pub fn price_cents(&self) -> Option<i64> {
        match self {
            Plan::Unitario => Some(1_500),
            Plan::Light => None,
            Plan::Basico => Some(1_500),
            Plan::Premium => Some(7_000),
            Plan::Enterprise => Some(25_000),
        }
    }

    /// Unit price as a decimal amount, the form the gateway expects.
    pub fn unit_price(&self) -> Option<f64> {
        self.price_cents().map(|cents| cents as f64 / 100.0)
    }

    /// Subscription length in calendar months.
    pub fn duration_months(&self) -> u32 {
        match self {
            Plan::Unitario | Plan::Light | Plan::Basico => 1,
            Plan::Premium => 6,
            Plan::Enterprise => 12,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
